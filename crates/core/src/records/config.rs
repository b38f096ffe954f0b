//! Building the pricing configuration from stored tier and loan documents.

use tracing::debug;

use super::{
    Document, IntegrityIssue, IntegrityReport, LOAN_COLLECTION, LoanRecord, RecordError,
    TIER_COLLECTION, TierRecord, non_blank,
};
use crate::error::{MissingConfiguration, PricingError};
use crate::types::{LoanProduct, LoanProductId, Tier, TierKind, TierSet, sort_by_term};

const LEGACY_TERM_FIELD: &str = "term";

/// Tiers and loan products as configured by an admin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingConfig {
    pub tiers: TierSet,
    /// Sorted by ascending term.
    pub loan_products: Vec<LoanProduct>,
}

impl PricingConfig {
    /// Assemble a config, ordering loan products by term.
    #[must_use]
    pub fn new(tiers: TierSet, mut loan_products: Vec<LoanProduct>) -> Self {
        sort_by_term(&mut loan_products);
        Self {
            tiers,
            loan_products,
        }
    }

    /// Build the config from stored documents.
    ///
    /// Loading never fails outright. A document that cannot be used is left
    /// out and the reason is recorded in the returned report, so one bad
    /// document does not take the whole proposal view down with it.
    #[must_use]
    pub fn from_documents(
        tier_documents: Vec<Document<TierRecord>>,
        loan_documents: Vec<Document<LoanRecord>>,
    ) -> (Self, IntegrityReport) {
        let mut report = IntegrityReport::default();

        let mut tiers = TierSet::new();
        for doc in tier_documents {
            let id = doc.id.clone();
            let Some(tier) = tier_from_document(doc, &mut report) else {
                continue;
            };
            if tiers.contains(tier.kind) {
                report.push(IntegrityIssue::DuplicateTier {
                    id,
                    kind: tier.kind,
                });
                continue;
            }
            tiers.insert(tier);
        }
        for kind in tiers.missing_kinds() {
            report.push(IntegrityIssue::TierNotConfigured { kind });
        }

        let mut loan_products = Vec::with_capacity(loan_documents.len());
        for doc in loan_documents {
            let id = doc.id.clone();
            match doc.into_loan_product() {
                Ok((product, issues)) => {
                    report.merge(issues);
                    loan_products.push(product);
                }
                Err(err) => report.push(IntegrityIssue::LoanSkipped {
                    id,
                    reason: err.to_string(),
                }),
            }
        }

        let config = Self::new(tiers, loan_products);
        debug!(
            tiers = config.tiers.len(),
            loan_products = config.loan_products.len(),
            issues = report.len(),
            "loaded pricing configuration"
        );
        (config, report)
    }

    /// Look up a loan product by id.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingConfiguration`] when no product has
    /// this id.
    pub fn loan_product(&self, id: &LoanProductId) -> Result<&LoanProduct, PricingError> {
        self.loan_products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| {
                PricingError::MissingConfiguration(MissingConfiguration::LoanProduct(id.clone()))
            })
    }
}

impl Document<LoanRecord> {
    /// Convert a stored loan option into a [`LoanProduct`].
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the name is blank, `years` is missing or
    /// not a whole number of at least one, or `rate` is missing or negative.
    pub fn into_loan_product(self) -> Result<(LoanProduct, IntegrityReport), RecordError> {
        let Self { id, mut data } = self;
        let mut report = IntegrityReport::default();

        if data.unrecognized.remove(LEGACY_TERM_FIELD).is_some() {
            report.push(IntegrityIssue::LegacyLoanTerm { id: id.clone() });
        }
        report.flag_unrecognized(LOAN_COLLECTION, &id, data.unrecognized.keys());

        let missing = |field| RecordError::MissingField {
            collection: LOAN_COLLECTION,
            id: id.clone(),
            field,
        };
        let invalid = |field, reason: &str| RecordError::InvalidField {
            collection: LOAN_COLLECTION,
            id: id.clone(),
            field,
            reason: reason.to_owned(),
        };

        let name = non_blank(data.name).ok_or_else(|| missing("name"))?;
        let years = data.years.ok_or_else(|| missing("years"))?;
        let term_years = whole_years(years).ok_or_else(|| {
            invalid("years", "must be a whole number of at least one year")
        })?;
        let annual_rate_percent = data.rate.ok_or_else(|| missing("rate"))?;
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(invalid("rate", "must be zero or a positive percentage"));
        }

        if let (Some(min), Some(max)) = (data.min_amount, data.max_amount)
            && min > max
        {
            report.push(IntegrityIssue::LoanBoundsInverted {
                id: id.clone(),
                min,
                max,
            });
        }

        let product = LoanProduct {
            id: LoanProductId::new(id),
            name,
            term_years,
            annual_rate_percent,
            min_amount: data.min_amount,
            max_amount: data.max_amount,
            description: data
                .description
                .map(|d| d.trim().to_owned())
                .unwrap_or_default(),
        };
        Ok((product, report))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_years(years: f64) -> Option<u32> {
    (years.is_finite() && years >= 1.0 && years.fract() == 0.0 && years <= f64::from(u32::MAX))
        .then_some(years as u32)
}

fn tier_from_document(doc: Document<TierRecord>, report: &mut IntegrityReport) -> Option<Tier> {
    let Document { id, data } = doc;
    let id_kind = id.parse::<TierKind>().ok();

    let kind = match data.kind.as_deref().map(str::trim) {
        Some(value) => match value.parse::<TierKind>() {
            Ok(kind) => {
                if id_kind.is_some_and(|id_kind| id_kind != kind) {
                    report.push(IntegrityIssue::TierKindMismatch {
                        id: id.clone(),
                        kind,
                    });
                }
                kind
            }
            Err(_) => {
                report.push(IntegrityIssue::UnknownTierKind {
                    id,
                    value: value.to_owned(),
                });
                return None;
            }
        },
        None => {
            let Some(kind) = id_kind else {
                report.push(IntegrityIssue::UntypedTier { id });
                return None;
            };
            kind
        }
    };

    report.flag_unrecognized(TIER_COLLECTION, &id, data.unrecognized.keys());

    let standard = positive_price(kind, "pricePerSquare", data.price_per_square, report);
    let small_job = positive_price(
        kind,
        "pricePerSquareUnder16",
        data.price_per_square_under16,
        report,
    );
    match (standard, small_job) {
        (None, _) => report.push(IntegrityIssue::MissingStandardPrice { kind }),
        (Some(standard), Some(small_job)) if small_job <= standard => {
            report.push(IntegrityIssue::SmallJobNotAboveStandard {
                kind,
                standard,
                small_job,
            });
        }
        _ => {}
    }

    Some(Tier {
        kind,
        title: trimmed(data.title),
        description: trimmed(data.description),
        warranty_text: trimmed(data.warranty),
        image_url: trimmed(data.image),
        price_per_square_standard: standard,
        price_per_square_small_job: small_job,
    })
}

/// Zero and negative prices are what the admin form stores for a blank
/// field. They are reported and treated as unset.
fn positive_price(
    kind: TierKind,
    field: &'static str,
    price: Option<f64>,
    report: &mut IntegrityReport,
) -> Option<f64> {
    match price {
        Some(value) if value.is_finite() && value > 0.0 => Some(value),
        Some(value) => {
            report.push(IntegrityIssue::NonPositivePrice { kind, field, value });
            None
        }
        None => None,
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_owned()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn tier_doc(id: &str, value: Value) -> Document<TierRecord> {
        Document::new(id, serde_json::from_value(value).unwrap())
    }

    fn loan_doc(id: &str, value: Value) -> Document<LoanRecord> {
        Document::new(id, serde_json::from_value(value).unwrap())
    }

    fn full_tiers() -> Vec<Document<TierRecord>> {
        vec![
            tier_doc(
                "good",
                json!({ "type": "good", "title": "Standard", "pricePerSquare": 625, "pricePerSquareUnder16": 725 }),
            ),
            tier_doc(
                "better",
                json!({ "type": "better", "title": "Premium", "pricePerSquare": 770 }),
            ),
            tier_doc(
                "best",
                json!({ "type": "best", "title": "Luxury", "pricePerSquare": 850, "pricePerSquareUnder16": 950 }),
            ),
        ]
    }

    #[test]
    fn test_clean_documents_load_cleanly() {
        let loans = vec![loan_doc(
            "l1",
            json!({ "name": "10 Year Fixed", "rate": 5.99, "years": 10 }),
        )];
        let (config, report) = PricingConfig::from_documents(full_tiers(), loans);

        assert!(report.is_clean(), "{report}");
        assert_eq!(config.tiers.len(), 3);
        let good = config.tiers.get(TierKind::Good).unwrap();
        assert_eq!(good.title, "Standard");
        assert_eq!(good.price_per_square_small_job, Some(725.0));
        assert_eq!(config.loan_products[0].term_years, 10);
    }

    #[test]
    fn test_missing_tier_is_reported() {
        let mut tiers = full_tiers();
        tiers.pop();
        let (config, report) = PricingConfig::from_documents(tiers, Vec::new());

        assert!(!config.tiers.contains(TierKind::Best));
        assert_eq!(
            report.issues(),
            &[IntegrityIssue::TierNotConfigured {
                kind: TierKind::Best
            }]
        );
    }

    #[test]
    fn test_kind_falls_back_to_document_id() {
        let (config, report) = PricingConfig::from_documents(
            vec![tier_doc("better", json!({ "pricePerSquare": 770 }))],
            Vec::new(),
        );
        assert!(config.tiers.contains(TierKind::Better));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_unknown_and_untyped_tiers_are_skipped() {
        let (config, report) = PricingConfig::from_documents(
            vec![
                tier_doc("x1", json!({ "type": "platinum", "pricePerSquare": 999 })),
                tier_doc("x2", json!({ "pricePerSquare": 999 })),
            ],
            Vec::new(),
        );

        assert!(config.tiers.is_empty());
        assert!(report.iter().any(|i| matches!(i, IntegrityIssue::UnknownTierKind { value, .. } if value == "platinum")));
        assert!(report.iter().any(|i| matches!(i, IntegrityIssue::UntypedTier { id } if id == "x2")));
    }

    #[test]
    fn test_duplicate_tier_keeps_first() {
        let mut tiers = full_tiers();
        tiers.push(tier_doc("good-copy", json!({ "type": "good", "pricePerSquare": 1 })));
        let (config, report) = PricingConfig::from_documents(tiers, Vec::new());

        assert_eq!(
            config.tiers.get(TierKind::Good).unwrap().price_per_square_standard,
            Some(625.0)
        );
        assert_eq!(
            report.issues(),
            &[IntegrityIssue::DuplicateTier {
                id: "good-copy".into(),
                kind: TierKind::Good
            }]
        );
    }

    #[test]
    fn test_id_type_mismatch_is_reported() {
        let (config, report) = PricingConfig::from_documents(
            vec![tier_doc("good", json!({ "type": "best", "pricePerSquare": 850 }))],
            Vec::new(),
        );
        assert!(config.tiers.contains(TierKind::Best));
        assert!(report.iter().any(|i| matches!(i, IntegrityIssue::TierKindMismatch { .. })));
    }

    #[test]
    fn test_zero_prices_become_unset() {
        let (config, report) = PricingConfig::from_documents(
            vec![tier_doc(
                "good",
                json!({ "type": "good", "pricePerSquare": 0, "pricePerSquareUnder16": 0 }),
            )],
            Vec::new(),
        );

        let good = config.tiers.get(TierKind::Good).unwrap();
        assert_eq!(good.price_per_square_standard, None);
        assert_eq!(good.price_per_square_small_job, None);
        assert!(report.iter().any(|i| matches!(i, IntegrityIssue::MissingStandardPrice { kind: TierKind::Good })));
        assert_eq!(
            report
                .iter()
                .filter(|i| matches!(i, IntegrityIssue::NonPositivePrice { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_small_job_not_above_standard_is_reported() {
        let mut tiers = full_tiers();
        tiers[0] = tier_doc(
            "good",
            json!({ "type": "good", "pricePerSquare": 700, "pricePerSquareUnder16": 650 }),
        );
        let (config, report) = PricingConfig::from_documents(tiers, Vec::new());

        assert_eq!(
            config.tiers.get(TierKind::Good).unwrap().price_per_square_small_job,
            Some(650.0)
        );
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_loans_sorted_by_term() {
        let loans = vec![
            loan_doc("a", json!({ "name": "15 Year", "rate": 6.99, "years": 15 })),
            loan_doc("b", json!({ "name": "5 Year", "rate": 0, "years": 5.0 })),
            loan_doc("c", json!({ "name": "10 Year", "rate": 5.99, "years": 10 })),
        ];
        let (config, report) = PricingConfig::from_documents(full_tiers(), loans);

        assert!(report.is_clean());
        let terms: Vec<u32> = config.loan_products.iter().map(|p| p.term_years).collect();
        assert_eq!(terms, [5, 10, 15]);
    }

    #[test]
    fn test_legacy_term_loan_is_skipped() {
        let loans = vec![loan_doc("old", json!({ "name": "Old", "rate": 4.5, "term": 120 }))];
        let (config, report) = PricingConfig::from_documents(full_tiers(), loans);

        assert!(config.loan_products.is_empty());
        assert_eq!(report.len(), 2);
        assert_eq!(report.issues()[0], IntegrityIssue::LegacyLoanTerm { id: "old".into() });
        assert!(matches!(&report.issues()[1], IntegrityIssue::LoanSkipped { id, .. } if id == "old"));
    }

    #[test]
    fn test_fractional_years_rejected() {
        let err = loan_doc("l", json!({ "name": "Odd", "rate": 5, "years": 7.5 }))
            .into_loan_product()
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "years", .. }));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = loan_doc("l", json!({ "name": "Bad", "rate": -1, "years": 5 }))
            .into_loan_product()
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "rate", .. }));
    }

    #[test]
    fn test_inverted_bounds_kept_but_reported() {
        let (product, report) = loan_doc(
            "l",
            json!({ "name": "Bounded", "rate": 5, "years": 5, "minAmount": 20000, "maxAmount": 5000 }),
        )
        .into_loan_product()
        .unwrap();

        assert_eq!(product.min_amount, Some(20_000.0));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_loan_product_lookup() {
        let loans = vec![loan_doc("l1", json!({ "name": "10 Year", "rate": 5.99, "years": 10 }))];
        let (config, _) = PricingConfig::from_documents(full_tiers(), loans);

        assert!(config.loan_product(&LoanProductId::new("l1")).is_ok());
        assert_eq!(
            config.loan_product(&LoanProductId::new("nope")).unwrap_err(),
            PricingError::MissingConfiguration(MissingConfiguration::LoanProduct(
                LoanProductId::new("nope")
            ))
        );
    }
}
