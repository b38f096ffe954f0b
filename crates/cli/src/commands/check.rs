//! Integrity check over a document snapshot.
//!
//! Flags stored data the pricing engine has to work around: misnamed fields,
//! unknown tier kinds, zero prices, legacy loan terms, unreadable proposals.
//! Exits non-zero when anything is found.
//!
//! # Usage
//!
//! ```bash
//! rq-cli check --snapshot store.json
//! ```

use std::path::Path;

use roofquote_core::{Document, IntegrityReport, load_config};
use tracing::{error, info};

use super::load_snapshot;

/// Check every document in the snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or any issue is found.
pub async fn run(snapshot_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(snapshot_path).await?;

    let (config, mut report) = load_config(&snapshot).await?;
    let mut broken_proposals = 0_usize;

    for (id, record) in &snapshot.proposals {
        match Document::new(id.as_str(), record.clone()).into_proposal() {
            Ok((_, issues)) => report.merge(issues),
            Err(e) => {
                error!("  - {e}");
                broken_proposals += 1;
            }
        }
    }

    info!(
        tiers = config.tiers.len(),
        loan_products = config.loan_products.len(),
        proposals = snapshot.proposals.len(),
        "Checked snapshot"
    );

    summarize(&report, broken_proposals)
}

fn summarize(report: &IntegrityReport, broken_proposals: usize) -> Result<(), Box<dyn std::error::Error>> {
    if report.is_clean() && broken_proposals == 0 {
        info!("No integrity issues found");
        return Ok(());
    }

    error!("Integrity check failed:");
    for issue in report {
        error!("  - {issue}");
    }
    Err(format!(
        "{} integrity issues and {broken_proposals} unreadable proposals found",
        report.len()
    )
    .into())
}
