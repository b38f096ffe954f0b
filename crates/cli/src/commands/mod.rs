//! Command implementations.

pub mod check;
pub mod payment;
pub mod price;
pub mod quote;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use roofquote_core::{DocumentSnapshot, ProposalQuote, TierQuote};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors reading a document snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML snapshot {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Read a snapshot, as YAML for `.yaml`/`.yml` files and JSON otherwise.
///
/// # Errors
///
/// Returns `SnapshotError` if the file cannot be read or parsed.
pub async fn load_snapshot(path: &Path) -> Result<DocumentSnapshot, SnapshotError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let snapshot = if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| SnapshotError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        DocumentSnapshot::from_json(&content).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    info!(
        path = %path.display(),
        tiers = snapshot.roofing_options.len(),
        loans = snapshot.loan_options.len(),
        proposals = snapshot.proposals.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Write `value` to stdout as pretty JSON.
pub fn write_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write a quote as a human-readable table.
pub fn write_quote(out: &mut impl Write, quote: &ProposalQuote) -> io::Result<()> {
    let size = if quote.is_small_job() { " (small job)" } else { "" };
    writeln!(out, "Job size: {} squares{size}", quote.squares())?;

    for tier in quote.tiers() {
        writeln!(out)?;
        match tier {
            TierQuote::Priced(priced) => {
                writeln!(
                    out,
                    "{} - {}: {} ({} per square)",
                    priced.kind.label(),
                    priced.title,
                    priced.formatted_total(),
                    priced.formatted_price_per_square(),
                )?;
                if priced.resolution.used_fallback() {
                    writeln!(out, "  warning: no configured price, fallback price used")?;
                }
                if !priced.warranty_text.is_empty() {
                    writeln!(out, "  Warranty: {}", priced.warranty_text)?;
                }
                for option in &priced.financing {
                    let bounds = match option.within_bounds {
                        Some(false) => " [outside advertised range]",
                        _ => "",
                    };
                    writeln!(
                        out,
                        "  {}: {}/mo, {} total, {} interest{bounds}",
                        option.label,
                        option.formatted_monthly_payment(),
                        option.formatted_total_paid(),
                        option.formatted_total_interest(),
                    )?;
                }
            }
            TierQuote::Missing { kind, warning } => {
                writeln!(out, "{}: unavailable ({warning})", kind.label())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roofquote_core::{LoanProduct, LoanProductId, PricingConfig, Tier, TierKind};

    use super::*;

    #[test]
    fn test_write_quote_lists_every_tier() {
        let config = PricingConfig::new(
            [Tier::new(TierKind::Good).with_prices(Some(625.0), Some(725.0))]
                .into_iter()
                .collect(),
            vec![LoanProduct {
                id: LoanProductId::new("l10"),
                name: "10 Year Fixed".into(),
                term_years: 10,
                annual_rate_percent: 5.99,
                min_amount: None,
                max_amount: None,
                description: String::new(),
            }],
        );
        let quote = ProposalQuote::build(20.0, &config).unwrap();

        let mut out = Vec::new();
        write_quote(&mut out, &quote).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Good - Good: $12,500 ($625 per square)"));
        assert!(text.contains("10 Year Fixed - 10 years at 5.99%: $138.71/mo"));
        assert!(text.contains("Better: unavailable"));
        assert!(text.contains("Best: unavailable"));
    }

    #[tokio::test]
    async fn test_load_yaml_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.yaml");
        std::fs::write(
            &path,
            "roofing_options:\n  good:\n    type: good\n    pricePerSquare: 625\nloan_options: {}\n",
        )
        .unwrap();

        let snapshot = load_snapshot(&path).await.unwrap();
        assert_eq!(snapshot.roofing_options.len(), 1);
        assert!(snapshot.proposals.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_snapshot() {
        let err = load_snapshot(Path::new("/nonexistent/roofquote.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Json { .. }));
    }
}
