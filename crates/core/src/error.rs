//! Error types shared across the engine.

use core::fmt;

use serde::Serialize;

use crate::types::{LoanProductId, TierKind};

/// Errors returned by the pricing and financing calculations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An input violated a calculation constraint (non-positive squares,
    /// non-positive principal or term, negative rate, non-finite numbers).
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
    /// A tier or loan product needed for display is not configured.
    #[error("missing configuration: {0}")]
    MissingConfiguration(MissingConfiguration),
}

impl PricingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// What piece of configuration is missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "missing", content = "key", rename_all = "snake_case")]
pub enum MissingConfiguration {
    /// No tier document exists for this kind.
    Tier(TierKind),
    /// No loan product exists with this id.
    LoanProduct(LoanProductId),
}

impl fmt::Display for MissingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(kind) => write!(f, "no `{kind}` tier is configured"),
            Self::LoanProduct(id) => write!(f, "no loan product with id `{id}`"),
        }
    }
}

/// A form value rejected when creating or editing a record.
///
/// The message is meant to be shown to staff as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the rejected field.
    pub field: &'static str,
    /// Explanation shown to the user.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
