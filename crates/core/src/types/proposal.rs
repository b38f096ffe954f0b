//! Customer proposals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{ProposalId, StaffKey};

const SQUARES_MESSAGE: &str = "enter a valid number of squares";

/// A customer quote document.
///
/// `squares` drives all pricing and is always finite and positive once a
/// proposal exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub customer_name: String,
    pub address: String,
    pub squares: f64,
    pub created_by: StaffKey,
    pub updated_by: StaffKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    /// Apply an edit from the staff edit form.
    ///
    /// The proposal is left untouched if any field is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if an edited field is blank or the new
    /// square count is not a positive number.
    pub fn apply_update(
        &mut self,
        update: ProposalUpdate,
        updated_by: StaffKey,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let customer_name = update
            .customer_name
            .map(|name| required("customerName", &name))
            .transpose()?;
        let address = update
            .address
            .map(|address| required("address", &address))
            .transpose()?;
        let squares = update.squares.map(validate_squares).transpose()?;

        if let Some(customer_name) = customer_name {
            self.customer_name = customer_name;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(squares) = squares {
            self.squares = squares;
        }
        self.updated_by = updated_by;
        self.updated_at = now;
        Ok(())
    }
}

/// Fields submitted from the create-proposal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub customer_name: String,
    pub address: String,
    pub squares: f64,
}

impl ProposalDraft {
    /// Check the draft before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the customer name or address is
    /// blank, or `squares` is not a finite positive number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("customerName", &self.customer_name)?;
        required("address", &self.address)?;
        validate_squares(self.squares)?;
        Ok(())
    }

    /// Validate and stamp a new proposal.
    ///
    /// # Errors
    ///
    /// See [`ProposalDraft::validate`].
    pub fn into_proposal(
        self,
        id: ProposalId,
        created_by: StaffKey,
        now: DateTime<Utc>,
    ) -> Result<Proposal, ValidationError> {
        self.validate()?;
        Ok(Proposal {
            id,
            customer_name: self.customer_name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            squares: self.squares,
            updated_by: created_by.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial edit of a proposal. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdate {
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub squares: Option<f64>,
}

/// Parse the square count typed into a form.
///
/// # Errors
///
/// Returns a [`ValidationError`] on `squares` unless the input is a finite
/// number greater than zero.
pub fn parse_squares(input: &str) -> Result<f64, ValidationError> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::new("squares", SQUARES_MESSAGE))?;
    validate_squares(value)
}

fn validate_squares(squares: f64) -> Result<f64, ValidationError> {
    if squares.is_finite() && squares > 0.0 {
        Ok(squares)
    } else {
        Err(ValidationError::new("squares", SQUARES_MESSAGE))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(field, "please fill in all fields"))
    } else {
        Ok(trimmed.to_owned())
    }
}
