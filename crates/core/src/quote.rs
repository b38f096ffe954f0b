//! Quotes: every tier priced for one job, with financing options.

use serde::Serialize;
use tracing::warn;

use crate::error::{MissingConfiguration, PricingError};
use crate::pricing::{
    Amortization, PriceResolution, format_currency, format_currency_with_cents, is_small_job,
    resolve_price, resolver::check_squares,
};
use crate::records::PricingConfig;
use crate::types::{LoanProduct, LoanProductId, Tier, TierKind};

/// A priced job: one entry per tier kind in Good/Better/Best order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalQuote {
    squares: f64,
    small_job: bool,
    tiers: Vec<TierQuote>,
}

impl ProposalQuote {
    /// Price every tier for a job of `squares` against `config`.
    ///
    /// A tier kind with no configuration produces a
    /// [`TierQuote::Missing`] entry instead of an error, so the other tiers
    /// still display.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] if `squares` is not a finite
    /// number greater than zero, or is too large for a tier total to stay
    /// finite.
    pub fn build(squares: f64, config: &PricingConfig) -> Result<Self, PricingError> {
        check_squares(squares)?;

        let mut tiers = Vec::with_capacity(TierKind::ALL.len());
        for kind in TierKind::ALL {
            let quote = match config.tiers.get(kind) {
                Some(tier) => TierQuote::Priced(PricedTier::new(
                    tier,
                    squares,
                    &config.loan_products,
                )?),
                None => {
                    warn!(tier = %kind, "tier is not configured; showing warning on quote");
                    TierQuote::Missing {
                        kind,
                        warning: MissingConfiguration::Tier(kind),
                    }
                }
            };
            tiers.push(quote);
        }

        Ok(Self {
            squares,
            small_job: is_small_job(squares),
            tiers,
        })
    }

    #[must_use]
    pub const fn squares(&self) -> f64 {
        self.squares
    }

    /// Whether the job is below the small-job breakpoint.
    #[must_use]
    pub const fn is_small_job(&self) -> bool {
        self.small_job
    }

    #[must_use]
    pub fn tiers(&self) -> &[TierQuote] {
        &self.tiers
    }

    #[must_use]
    pub fn tier(&self, kind: TierKind) -> Option<&TierQuote> {
        self.tiers.iter().find(|quote| quote.kind() == kind)
    }

    /// The priced tier of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingConfiguration`] when the tier is not
    /// configured.
    pub fn priced(&self, kind: TierKind) -> Result<&PricedTier, PricingError> {
        self.tier(kind)
            .and_then(TierQuote::as_priced)
            .ok_or(PricingError::MissingConfiguration(MissingConfiguration::Tier(kind)))
    }

    /// Financing for the tier and loan product a viewer selected.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingConfiguration`] when either the tier or
    /// the loan product is not configured.
    pub fn financing_for(
        &self,
        kind: TierKind,
        loan_id: &LoanProductId,
    ) -> Result<&FinancingOption, PricingError> {
        self.priced(kind)?
            .financing
            .iter()
            .find(|option| &option.loan_id == loan_id)
            .ok_or_else(|| {
                PricingError::MissingConfiguration(MissingConfiguration::LoanProduct(
                    loan_id.clone(),
                ))
            })
    }

    /// Warnings for tiers that could not be shown.
    pub fn warnings(&self) -> impl Iterator<Item = &MissingConfiguration> {
        self.tiers.iter().filter_map(|quote| match quote {
            TierQuote::Missing { warning, .. } => Some(warning),
            TierQuote::Priced(_) => None,
        })
    }

    /// Whether any tier was priced from the fallback table.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.tiers
            .iter()
            .filter_map(TierQuote::as_priced)
            .any(|tier| tier.resolution.used_fallback())
    }
}

/// One tier's slot on a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TierQuote {
    Priced(PricedTier),
    /// The tier is not configured; the quote shows `warning` in its place.
    Missing {
        kind: TierKind,
        warning: MissingConfiguration,
    },
}

impl TierQuote {
    #[must_use]
    pub const fn kind(&self) -> TierKind {
        match self {
            Self::Priced(tier) => tier.kind,
            Self::Missing { kind, .. } => *kind,
        }
    }

    #[must_use]
    pub const fn as_priced(&self) -> Option<&PricedTier> {
        match self {
            Self::Priced(tier) => Some(tier),
            Self::Missing { .. } => None,
        }
    }
}

/// A configured tier priced for the job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedTier {
    pub kind: TierKind,
    pub title: String,
    pub description: String,
    pub warranty_text: String,
    pub image_url: String,
    #[serde(flatten)]
    pub resolution: PriceResolution,
    /// One option per loan product, in ascending term order.
    pub financing: Vec<FinancingOption>,
}

impl PricedTier {
    fn new(tier: &Tier, squares: f64, loan_products: &[LoanProduct]) -> Result<Self, PricingError> {
        let resolution = resolve_price(tier, squares)?;
        let financing = loan_products
            .iter()
            .map(|product| FinancingOption::new(product, resolution.total_price))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            kind: tier.kind,
            title: tier.display_title().to_owned(),
            description: tier.description.clone(),
            warranty_text: tier.warranty_text.clone(),
            image_url: tier.image_url.clone(),
            resolution,
            financing,
        })
    }

    /// Headline total, e.g. `$12,500`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_currency(self.resolution.total_price)
    }

    /// Per-square price, e.g. `$625`.
    #[must_use]
    pub fn formatted_price_per_square(&self) -> String {
        format_currency(self.resolution.price_per_square)
    }
}

/// A loan product applied to a tier's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOption {
    pub loan_id: LoanProductId,
    pub label: String,
    pub description: String,
    #[serde(flatten)]
    pub amortization: Amortization,
    pub total_paid: f64,
    pub total_interest: f64,
    /// Whether the total falls inside the product's advertised bounds;
    /// `None` when it has none. Informational only.
    pub within_bounds: Option<bool>,
}

impl FinancingOption {
    /// Finance `total` with `product`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] if `total` is not a finite
    /// positive amount or the product's term or rate is invalid.
    pub fn new(product: &LoanProduct, total: f64) -> Result<Self, PricingError> {
        let amortization = Amortization::new(total, product.annual_rate_percent, product.term_years)?;
        Ok(Self {
            loan_id: product.id.clone(),
            label: product.label(),
            description: product.description.clone(),
            total_paid: amortization.total_paid(),
            total_interest: amortization.total_interest(),
            within_bounds: product.bounds_cover(total),
            amortization,
        })
    }

    #[must_use]
    pub const fn monthly_payment(&self) -> f64 {
        self.amortization.monthly_payment
    }

    /// Monthly payment, e.g. `$138.71`.
    #[must_use]
    pub fn formatted_monthly_payment(&self) -> String {
        format_currency_with_cents(self.amortization.monthly_payment)
    }

    #[must_use]
    pub fn formatted_total_paid(&self) -> String {
        format_currency_with_cents(self.total_paid)
    }

    #[must_use]
    pub fn formatted_total_interest(&self) -> String {
        format_currency_with_cents(self.total_interest)
    }
}
