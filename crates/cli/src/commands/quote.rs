//! Quote a stored proposal.
//!
//! # Usage
//!
//! ```bash
//! rq-cli quote QmT9xWv2 --snapshot store.json
//! rq-cli quote QmT9xWv2 --json
//! ```

use std::io::{self, Write};
use std::path::Path;

use roofquote_core::pricing::format_currency;
use roofquote_core::{ProposalId, TierQuote, quote_proposal};
use tracing::{info, warn};

use super::{load_snapshot, write_json, write_quote};

/// Quote the proposal `id` from the snapshot at `snapshot_path`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded, the proposal does not
/// exist or is malformed, or the stored configuration cannot be priced.
pub async fn run(id: &str, snapshot_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(snapshot_path).await?;
    let quoted = quote_proposal(&snapshot, &ProposalId::new(id)).await?;

    if !quoted.integrity.is_clean() {
        warn!(
            issues = quoted.integrity.len(),
            "Stored data has integrity issues; run `rq-cli check` for details"
        );
    }

    if json {
        return write_json(&quoted);
    }

    let proposal = &quoted.proposal;
    let mut out = io::stdout().lock();
    writeln!(out, "Proposal {}", proposal.id)?;
    writeln!(out, "Customer: {}", proposal.customer_name)?;
    writeln!(out, "Address:  {}", proposal.address)?;
    writeln!(
        out,
        "Prepared by {} on {}",
        proposal.created_by,
        proposal.created_at.format("%B %-d, %Y")
    )?;
    writeln!(out)?;
    write_quote(&mut out, &quoted.quote)?;

    if let Some(best) = quoted
        .quote
        .tiers()
        .iter()
        .filter_map(TierQuote::as_priced)
        .map(|tier| tier.resolution.total_price)
        .reduce(f64::max)
    {
        info!(proposal = %proposal.id, top_total = %format_currency(best), "Quote complete");
    }
    Ok(())
}
