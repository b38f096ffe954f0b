//! Integrity findings for stored configuration.

use core::fmt;

use serde::Serialize;
use tracing::warn;

use crate::types::TierKind;

/// A problem found in stored data that pricing can work around but an admin
/// should fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// A document carries a key the engine does not read.
    UnrecognizedField {
        collection: &'static str,
        id: String,
        field: String,
    },
    /// A tier document's `type` is not good, better or best. The document
    /// is ignored.
    UnknownTierKind { id: String, value: String },
    /// A tier document has no `type` and its id is not a tier kind either.
    /// The document is ignored.
    UntypedTier { id: String },
    /// A tier document's id names a different kind than its `type`.
    TierKindMismatch { id: String, kind: TierKind },
    /// A second document claims a kind that is already configured. The
    /// later document is ignored.
    DuplicateTier { id: String, kind: TierKind },
    /// No document exists for this tier kind.
    TierNotConfigured { kind: TierKind },
    /// The tier has no usable standard price; large jobs are priced from the
    /// fallback table.
    MissingStandardPrice { kind: TierKind },
    /// A stored price is zero or negative and is treated as unset.
    NonPositivePrice {
        kind: TierKind,
        field: &'static str,
        value: f64,
    },
    /// The small-job price does not exceed the standard price.
    SmallJobNotAboveStandard {
        kind: TierKind,
        standard: f64,
        small_job: f64,
    },
    /// A loan document uses the old `term` key (months) instead of `years`.
    LegacyLoanTerm { id: String },
    /// A loan document cannot be priced and is left out of financing.
    LoanSkipped { id: String, reason: String },
    /// A loan document's `minAmount` is above its `maxAmount`.
    LoanBoundsInverted { id: String, min: f64, max: f64 },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedField {
                collection,
                id,
                field,
            } => write!(f, "{collection}/{id}: unrecognized field `{field}`"),
            Self::UnknownTierKind { id, value } => {
                write!(f, "roofing_options/{id}: unknown tier type `{value}`; document ignored")
            }
            Self::UntypedTier { id } => {
                write!(f, "roofing_options/{id}: no `type` field; document ignored")
            }
            Self::TierKindMismatch { id, kind } => {
                write!(f, "roofing_options/{id}: document id does not match type `{kind}`")
            }
            Self::DuplicateTier { id, kind } => {
                write!(f, "roofing_options/{id}: duplicate `{kind}` tier; document ignored")
            }
            Self::TierNotConfigured { kind } => write!(f, "no `{kind}` tier is configured"),
            Self::MissingStandardPrice { kind } => write!(
                f,
                "`{kind}` tier has no `pricePerSquare`; fallback price {} is used",
                kind.fallback_price_per_square()
            ),
            Self::NonPositivePrice { kind, field, value } => {
                write!(f, "`{kind}` tier `{field}` is {value}; treated as unset")
            }
            Self::SmallJobNotAboveStandard {
                kind,
                standard,
                small_job,
            } => write!(
                f,
                "`{kind}` tier small-job price {small_job} is not above standard price {standard}"
            ),
            Self::LegacyLoanTerm { id } => write!(
                f,
                "loan_options/{id}: uses legacy `term` field; store the term in `years`"
            ),
            Self::LoanSkipped { id, reason } => {
                write!(f, "loan_options/{id}: {reason}; left out of financing")
            }
            Self::LoanBoundsInverted { id, min, max } => {
                write!(f, "loan_options/{id}: minAmount {min} is above maxAmount {max}")
            }
        }
    }
}

/// Every integrity issue found while loading a set of documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IntegrityReport {
    issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn push(&mut self, issue: IntegrityIssue) {
        self.issues.push(issue);
    }

    /// Record each key in `fields` as unrecognized.
    pub fn flag_unrecognized<'a>(
        &mut self,
        collection: &'static str,
        id: &str,
        fields: impl IntoIterator<Item = &'a String>,
    ) {
        for field in fields {
            self.push(IntegrityIssue::UnrecognizedField {
                collection,
                id: id.to_owned(),
                field: field.clone(),
            });
        }
    }

    /// Append the issues of another report.
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn issues(&self) -> &[IntegrityIssue] {
        &self.issues
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntegrityIssue> {
        self.issues.iter()
    }

    /// Emit one warning per issue.
    pub fn log(&self) {
        for issue in &self.issues {
            warn!(%issue, "configuration integrity issue");
        }
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IntegrityReport {
    type Item = &'a IntegrityIssue;
    type IntoIter = std::slice::Iter<'a, IntegrityIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
