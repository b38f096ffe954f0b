//! Roofquote Core - Pricing and financing engine for roofing proposals.
//!
//! Every surface that shows a proposal price (the admin tier preview,
//! proposal creation and the customer-facing proposal view) is built on this
//! crate:
//!
//! - `rq-cli` - Operator tool for quoting stored proposals and checking data
//! - `integration-tests` - End-to-end pricing scenarios
//!
//! # Architecture
//!
//! The core crate performs no I/O. Stored documents come in through the
//! [`QuoteSource`] trait, are parsed and checked in [`records`], and are
//! priced by [`pricing`] into a [`ProposalQuote`].
//!
//! # Modules
//!
//! - [`types`] - Tiers, loan products, proposals and their editor drafts
//! - [`pricing`] - Price resolution, amortization and currency formatting
//! - [`records`] - Persisted document shapes and integrity checks
//! - [`quote`] - Quote assembly across tiers and loan products
//! - [`source`] - The document store interface
//! - [`snapshot`] - An in-memory document store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod pricing;
pub mod quote;
pub mod records;
pub mod snapshot;
pub mod source;
pub mod types;

pub use error::{MissingConfiguration, PricingError, ValidationError};
pub use quote::{FinancingOption, PricedTier, ProposalQuote, TierQuote};
pub use records::{Document, IntegrityIssue, IntegrityReport, PricingConfig, RecordError};
pub use snapshot::DocumentSnapshot;
pub use source::{QuoteError, QuoteSource, QuotedProposal, load_config, quote_proposal};
pub use types::*;
