//! Domain types for the roofing proposal system.
//!
//! This module provides the records the pricing engine consumes: tiers,
//! loan products, proposals, and the ids and staff keys that tie them
//! together.

pub mod id;
pub mod loan;
pub mod proposal;
pub mod staff;
pub mod tier;

pub use id::{LoanProductId, ProposalId};
pub use loan::{LoanProduct, LoanProductDraft, sort_by_term};
pub use proposal::{Proposal, ProposalDraft, ProposalUpdate, parse_squares};
pub use staff::{StaffKey, StaffKeyError};
pub use tier::{Tier, TierDraft, TierKind, TierSet};
