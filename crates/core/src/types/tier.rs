//! Good/Better/Best pricing tiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MissingConfiguration, PricingError, ValidationError};

/// The three product packages offered on every proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Good,
    Better,
    Best,
}

impl TierKind {
    /// All kinds in display order.
    pub const ALL: [Self; 3] = [Self::Good, Self::Better, Self::Best];

    /// Per-square price used when a tier document carries no usable price.
    ///
    /// Reliance on this table means admin data is missing and is always
    /// reported as an integrity warning.
    #[must_use]
    pub const fn fallback_price_per_square(self) -> f64 {
        match self {
            Self::Good => 625.0,
            Self::Better => 770.0,
            Self::Best => 850.0,
        }
    }

    /// Persisted key, also the tier document id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Better => "better",
            Self::Best => "best",
        }
    }

    /// Capitalized label for headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Better => "Better",
            Self::Best => "Best",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "better" => Ok(Self::Better),
            "best" => Ok(Self::Best),
            _ => Err(format!("invalid tier kind: {s}")),
        }
    }
}

/// A tier as read back from storage.
///
/// Prices are optional because stored documents may be incomplete; the
/// pricing resolver decides what to do with a missing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub kind: TierKind,
    pub title: String,
    pub description: String,
    pub warranty_text: String,
    pub image_url: String,
    /// Price per square at or above the small-job breakpoint.
    pub price_per_square_standard: Option<f64>,
    /// Price per square below the small-job breakpoint.
    pub price_per_square_small_job: Option<f64>,
}

impl Tier {
    /// A tier with no display content and no prices.
    #[must_use]
    pub const fn new(kind: TierKind) -> Self {
        Self {
            kind,
            title: String::new(),
            description: String::new(),
            warranty_text: String::new(),
            image_url: String::new(),
            price_per_square_standard: None,
            price_per_square_small_job: None,
        }
    }

    /// Set both per-square prices.
    #[must_use]
    pub const fn with_prices(mut self, standard: Option<f64>, small_job: Option<f64>) -> Self {
        self.price_per_square_standard = standard;
        self.price_per_square_small_job = small_job;
        self
    }

    /// Heading for the tier card, falling back to the kind label.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.kind.label()
        } else {
            &self.title
        }
    }
}

/// Tier content submitted from the admin editor.
///
/// Saving a draft overwrites the whole tier document for its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDraft {
    pub kind: TierKind,
    pub title: String,
    pub description: String,
    pub warranty_text: String,
    pub image_url: String,
    pub price_per_square_standard: f64,
    pub price_per_square_small_job: Option<f64>,
}

impl TierDraft {
    /// Content a tier is reset to when an admin restores defaults.
    #[must_use]
    pub fn defaults(kind: TierKind) -> Self {
        let (title, description, warranty_text, small_job) = match kind {
            TierKind::Good => (
                "Standard Quality",
                "Quality 3-tab asphalt shingles with reliable protection. Perfect for budget-conscious homeowners who want dependable roofing.",
                "20-year manufacturer warranty with 5-year workmanship guarantee",
                725.0,
            ),
            TierKind::Better => (
                "Premium Quality",
                "Premium architectural shingles with enhanced durability and curb appeal. Superior wind resistance and longer lifespan.",
                "30-year manufacturer warranty with 10-year workmanship guarantee",
                870.0,
            ),
            TierKind::Best => (
                "Elite Quality",
                "Top-tier designer shingles with lifetime warranty. Premium materials with enhanced insulation and comprehensive protection.",
                "Lifetime manufacturer warranty with 15-year workmanship guarantee",
                950.0,
            ),
        };

        Self {
            kind,
            title: title.to_owned(),
            description: description.to_owned(),
            warranty_text: warranty_text.to_owned(),
            image_url: String::new(),
            price_per_square_standard: kind.fallback_price_per_square(),
            price_per_square_small_job: Some(small_job),
        }
    }

    /// Check the draft before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the title is blank, the standard
    /// price is not a positive number, or a small-job price is set that is
    /// not strictly greater than the standard price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "title cannot be empty"));
        }

        let standard = self.price_per_square_standard;
        if !standard.is_finite() || standard <= 0.0 {
            return Err(ValidationError::new(
                "pricePerSquare",
                "enter a positive price per square",
            ));
        }

        if let Some(small_job) = self.price_per_square_small_job {
            if !small_job.is_finite() || small_job <= 0.0 {
                return Err(ValidationError::new(
                    "pricePerSquareUnder16",
                    "enter a positive small-job price per square",
                ));
            }
            if small_job <= standard {
                return Err(ValidationError::new(
                    "pricePerSquareUnder16",
                    format!("small-job price must be greater than the standard price ({standard})"),
                ));
            }
        }

        Ok(())
    }

    /// Validate and convert into the stored tier.
    ///
    /// # Errors
    ///
    /// See [`TierDraft::validate`].
    pub fn into_tier(self) -> Result<Tier, ValidationError> {
        self.validate()?;
        Ok(Tier {
            kind: self.kind,
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            warranty_text: self.warranty_text.trim().to_owned(),
            image_url: self.image_url.trim().to_owned(),
            price_per_square_standard: Some(self.price_per_square_standard),
            price_per_square_small_job: self.price_per_square_small_job,
        })
    }
}

/// At most one tier per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierSet {
    good: Option<Tier>,
    better: Option<Tier>,
    best: Option<Tier>,
}

impl TierSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            good: None,
            better: None,
            best: None,
        }
    }

    const fn slot(&self, kind: TierKind) -> &Option<Tier> {
        match kind {
            TierKind::Good => &self.good,
            TierKind::Better => &self.better,
            TierKind::Best => &self.best,
        }
    }

    fn slot_mut(&mut self, kind: TierKind) -> &mut Option<Tier> {
        match kind {
            TierKind::Good => &mut self.good,
            TierKind::Better => &mut self.better,
            TierKind::Best => &mut self.best,
        }
    }

    /// Upsert a tier, returning the one it replaced.
    pub fn insert(&mut self, tier: Tier) -> Option<Tier> {
        let kind = tier.kind;
        self.slot_mut(kind).replace(tier)
    }

    #[must_use]
    pub const fn get(&self, kind: TierKind) -> Option<&Tier> {
        self.slot(kind).as_ref()
    }

    #[must_use]
    pub const fn contains(&self, kind: TierKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Look up a tier that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingConfiguration`] when no tier of this
    /// kind is configured.
    pub fn require(&self, kind: TierKind) -> Result<&Tier, PricingError> {
        self.get(kind).ok_or(PricingError::MissingConfiguration(
            MissingConfiguration::Tier(kind),
        ))
    }

    /// Kinds with no tier, in display order.
    #[must_use]
    pub fn missing_kinds(&self) -> Vec<TierKind> {
        TierKind::ALL
            .into_iter()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Configured tiers in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        TierKind::ALL.into_iter().filter_map(|kind| self.get(kind))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.good.is_none() && self.better.is_none() && self.best.is_none()
    }
}

impl FromIterator<Tier> for TierSet {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        let mut set = Self::new();
        for tier in iter {
            set.insert(tier);
        }
        set
    }
}
