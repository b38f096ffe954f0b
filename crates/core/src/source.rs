//! The document store seen from the quoting engine.
//!
//! The engine performs no I/O of its own. A [`QuoteSource`] hands it stored
//! documents, and [`quote_proposal`] turns them into a quote.

use std::future::Future;

use serde::Serialize;
use tracing::{info, instrument};

use crate::error::PricingError;
use crate::quote::ProposalQuote;
use crate::records::{
    Document, IntegrityReport, LoanRecord, PricingConfig, ProposalRecord, RecordError, TierRecord,
};
use crate::types::{Proposal, ProposalId};

/// Read access to the tier, loan and proposal collections.
pub trait QuoteSource: Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every `roofing_options` document. Zero to three are expected.
    fn tier_documents(
        &self,
    ) -> impl Future<Output = Result<Vec<Document<TierRecord>>, Self::Error>> + Send;

    /// Every `loan_options` document, in any order.
    fn loan_documents(
        &self,
    ) -> impl Future<Output = Result<Vec<Document<LoanRecord>>, Self::Error>> + Send;

    /// One `proposals` document, or `None` if it does not exist.
    fn proposal_document(
        &self,
        id: &ProposalId,
    ) -> impl Future<Output = Result<Option<Document<ProposalRecord>>, Self::Error>> + Send;
}

/// Errors from [`quote_proposal`].
#[derive(thiserror::Error, Debug)]
pub enum QuoteError<E> {
    #[error("document store error: {0}")]
    Source(#[source] E),

    #[error("proposal not found: {0}")]
    NotFound(ProposalId),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A stored proposal with its quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotedProposal {
    pub proposal: Proposal,
    pub quote: ProposalQuote,
    /// Problems found in the documents the quote was built from.
    pub integrity: IntegrityReport,
}

/// Load everything a proposal view needs and price it.
///
/// Integrity issues are logged and returned with the quote; they never stop
/// the quote from being built.
///
/// # Errors
///
/// Returns [`QuoteError::NotFound`] if the proposal does not exist,
/// [`QuoteError::Record`] if its document is malformed,
/// [`QuoteError::Source`] if the store fails, and [`QuoteError::Pricing`]
/// if the stored configuration cannot be priced.
#[instrument(skip(source), fields(proposal = %id))]
pub async fn quote_proposal<S: QuoteSource>(
    source: &S,
    id: &ProposalId,
) -> Result<QuotedProposal, QuoteError<S::Error>> {
    let document = source
        .proposal_document(id)
        .await
        .map_err(QuoteError::Source)?
        .ok_or_else(|| QuoteError::NotFound(id.clone()))?;
    let (proposal, mut integrity) = document.into_proposal()?;

    let tiers = source.tier_documents().await.map_err(QuoteError::Source)?;
    let loans = source.loan_documents().await.map_err(QuoteError::Source)?;
    let (config, config_report) = PricingConfig::from_documents(tiers, loans);
    integrity.merge(config_report);
    integrity.log();

    let quote = ProposalQuote::build(proposal.squares, &config)?;
    info!(
        squares = proposal.squares,
        tiers = config.tiers.len(),
        loan_products = config.loan_products.len(),
        issues = integrity.len(),
        "quoted proposal"
    );

    Ok(QuotedProposal {
        proposal,
        quote,
        integrity,
    })
}

/// Load and check the pricing configuration without quoting a proposal.
///
/// # Errors
///
/// Returns the source's error if either collection cannot be read.
pub async fn load_config<S: QuoteSource>(
    source: &S,
) -> Result<(PricingConfig, IntegrityReport), S::Error> {
    let tiers = source.tier_documents().await?;
    let loans = source.loan_documents().await?;
    Ok(PricingConfig::from_documents(tiers, loans))
}
