//! Price a job size against the stored tiers without a proposal.
//!
//! # Usage
//!
//! ```bash
//! rq-cli price --squares 18.5
//! ```

use std::io;
use std::path::Path;

use roofquote_core::{ProposalQuote, load_config, parse_squares};
use tracing::info;

use super::{load_snapshot, write_json, write_quote};

/// Quote every configured tier for `squares`.
///
/// # Errors
///
/// Returns an error if `squares` is not a positive number or the snapshot
/// cannot be loaded.
pub async fn run(squares: &str, snapshot_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let squares = parse_squares(squares)?;
    let snapshot = load_snapshot(snapshot_path).await?;

    let (config, report) = load_config(&snapshot).await?;
    report.log();

    let quote = ProposalQuote::build(squares, &config)?;
    info!(squares, small_job = quote.is_small_job(), "Priced job");

    if json {
        return write_json(&quote);
    }
    write_quote(&mut io::stdout().lock(), &quote)?;
    Ok(())
}
