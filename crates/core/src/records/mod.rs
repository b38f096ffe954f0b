//! Persisted document shapes and their conversion into domain types.
//!
//! The document store keeps three collections. Their field names are part of
//! the contract with the store and are mirrored here exactly:
//!
//! | Collection | Fields |
//! |------------|--------|
//! | `roofing_options` | `type`, `title`, `description`, `warranty`, `image`, `pricePerSquare`, `pricePerSquareUnder16` |
//! | `loan_options` | `name`, `rate`, `years`, `minAmount`, `maxAmount`, `description` |
//! | `proposals` | `customerName`, `address`, `squares`, `createdBy`, `updatedBy`, `createdAt`, `updatedAt` |
//!
//! A renamed field does not fail deserialization. It shows up in the
//! record's `unrecognized` map and is reported as an
//! [`IntegrityIssue::UnrecognizedField`], so a typo in stored data is visible
//! instead of quietly sending a tier to its fallback price.

mod config;
mod integrity;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Proposal, ProposalId, StaffKey};

pub use config::PricingConfig;
pub use integrity::{IntegrityIssue, IntegrityReport};

pub const TIER_COLLECTION: &str = "roofing_options";
pub const LOAN_COLLECTION: &str = "loan_options";
pub const PROPOSAL_COLLECTION: &str = "proposals";

/// A stored record together with its document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub id: String,
    pub data: T,
}

impl<T> Document<T> {
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// A `roofing_options` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierRecord {
    #[serde(rename = "type", alias = "kind", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "pricePerSquare", default, skip_serializing_if = "Option::is_none")]
    pub price_per_square: Option<f64>,
    #[serde(
        rename = "pricePerSquareUnder16",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_square_under16: Option<f64>,
    /// Keys the engine does not know about.
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

/// A `loan_options` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Annual rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Term in years. Stored as a JSON number, so it may arrive as `10.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
    #[serde(rename = "minAmount", default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(rename = "maxAmount", default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

/// A `proposals` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squares: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

/// A stored document that cannot be turned into a domain value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{collection}/{id}: missing field `{field}`")]
    MissingField {
        collection: &'static str,
        id: String,
        field: &'static str,
    },
    #[error("{collection}/{id}: invalid `{field}`: {reason}")]
    InvalidField {
        collection: &'static str,
        id: String,
        field: &'static str,
        reason: String,
    },
}

impl Document<ProposalRecord> {
    /// Convert a stored proposal into a [`Proposal`].
    ///
    /// `updatedBy` and `updatedAt` default to the creator and creation time
    /// when a document predates them. Unknown keys are reported alongside
    /// the proposal rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the customer name, address, square count,
    /// creator or creation time is missing or invalid.
    pub fn into_proposal(self) -> Result<(Proposal, IntegrityReport), RecordError> {
        let Self { id, data } = self;
        let missing = |field| RecordError::MissingField {
            collection: PROPOSAL_COLLECTION,
            id: id.clone(),
            field,
        };
        let invalid = |field, reason: &str| RecordError::InvalidField {
            collection: PROPOSAL_COLLECTION,
            id: id.clone(),
            field,
            reason: reason.to_owned(),
        };

        let customer_name = non_blank(data.customer_name).ok_or_else(|| missing("customerName"))?;
        let address = non_blank(data.address).ok_or_else(|| missing("address"))?;
        let squares = data.squares.ok_or_else(|| missing("squares"))?;
        if !squares.is_finite() || squares <= 0.0 {
            return Err(invalid("squares", "must be greater than zero"));
        }

        let created_by = data.created_by.ok_or_else(|| missing("createdBy"))?;
        let created_by =
            StaffKey::parse(&created_by).map_err(|e| invalid("createdBy", e.to_string().as_str()))?;
        let updated_by = match data.updated_by {
            Some(key) => StaffKey::parse(&key).map_err(|e| invalid("updatedBy", e.to_string().as_str()))?,
            None => created_by.clone(),
        };
        let created_at = data.created_at.ok_or_else(|| missing("createdAt"))?;
        let updated_at = data.updated_at.unwrap_or(created_at);

        let mut report = IntegrityReport::default();
        report.flag_unrecognized(PROPOSAL_COLLECTION, &id, data.unrecognized.keys());

        let proposal = Proposal {
            id: ProposalId::new(id),
            customer_name,
            address,
            squares,
            created_by,
            updated_by,
            created_at,
            updated_at,
        };
        Ok((proposal, report))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
