//! Financing products offered on proposals.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::LoanProductId;

/// A financing product configured by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub id: LoanProductId,
    pub name: String,
    pub term_years: u32,
    /// Annual rate in percent; `0` means interest-free.
    pub annual_rate_percent: f64,
    /// Informational lower bound on the financed amount.
    pub min_amount: Option<f64>,
    /// Informational upper bound on the financed amount.
    pub max_amount: Option<f64>,
    pub description: String,
}

impl LoanProduct {
    /// Whether `amount` falls inside the product's advertised bounds.
    ///
    /// Returns `None` when the product has no bounds at all. The result is
    /// only shown to the viewer; it never hides a product.
    #[must_use]
    pub fn bounds_cover(&self, amount: f64) -> Option<bool> {
        match (self.min_amount, self.max_amount) {
            (None, None) => None,
            (min, max) => Some(
                min.is_none_or(|min| amount >= min) && max.is_none_or(|max| amount <= max),
            ),
        }
    }

    /// Dropdown label, e.g. `10 Year Fixed - 10 years at 5.99%`.
    #[must_use]
    pub fn label(&self) -> String {
        let unit = if self.term_years == 1 { "year" } else { "years" };
        format!(
            "{} - {} {unit} at {}%",
            self.name, self.term_years, self.annual_rate_percent
        )
    }
}

/// Order loan products by ascending term.
///
/// Storage gives no ordering guarantee. The sort is stable, so products with
/// the same term keep their listing order.
pub fn sort_by_term(products: &mut [LoanProduct]) {
    products.sort_by_key(|p| p.term_years);
}

/// Loan product fields submitted from the admin editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProductDraft {
    pub name: String,
    pub term_years: u32,
    pub annual_rate_percent: f64,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl LoanProductDraft {
    /// Check the draft before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is blank, the term is zero,
    /// the rate is negative or not a number, a bound is negative or not a
    /// number, or the minimum exceeds the maximum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "name cannot be empty"));
        }

        if self.term_years == 0 {
            return Err(ValidationError::new("years", "term must be at least one year"));
        }

        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(ValidationError::new(
                "rate",
                "rate must be zero or a positive percentage",
            ));
        }

        for (field, bound) in [("minAmount", self.min_amount), ("maxAmount", self.max_amount)] {
            if let Some(value) = bound
                && (!value.is_finite() || value < 0.0)
            {
                return Err(ValidationError::new(field, "amount must be zero or positive"));
            }
        }

        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount)
            && min > max
        {
            return Err(ValidationError::new(
                "maxAmount",
                "maximum amount must not be below the minimum amount",
            ));
        }

        Ok(())
    }

    /// Validate and assign a freshly generated id.
    ///
    /// # Errors
    ///
    /// See [`LoanProductDraft::validate`].
    pub fn into_product(self) -> Result<LoanProduct, ValidationError> {
        self.into_product_with_id(LoanProductId::generate())
    }

    /// Validate and keep an existing id, for edits.
    ///
    /// # Errors
    ///
    /// See [`LoanProductDraft::validate`].
    pub fn into_product_with_id(self, id: LoanProductId) -> Result<LoanProduct, ValidationError> {
        self.validate()?;
        Ok(LoanProduct {
            id,
            name: self.name.trim().to_owned(),
            term_years: self.term_years,
            annual_rate_percent: self.annual_rate_percent,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            description: self.description.trim().to_owned(),
        })
    }
}
