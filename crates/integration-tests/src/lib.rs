//! Integration tests for the roofquote pricing engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roofquote-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing_scenarios` - Reference pricing and financing figures
//! - `snapshot_quote` - Quoting stored proposals from a document snapshot
//! - `integrity` - Detecting broken stored data
//!
//! Fixtures live in `fixtures/` and are loaded with [`fixture_snapshot`].

use std::path::{Path, PathBuf};

use roofquote_core::DocumentSnapshot;

/// Path to a file under this crate's `fixtures/` directory.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Errors loading a fixture snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("reading fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing JSON fixture: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parsing YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load a snapshot fixture by file name: YAML for `.yaml`/`.yml`, JSON
/// otherwise.
///
/// # Errors
///
/// Returns `FixtureError` if the fixture is missing or malformed.
pub async fn fixture_snapshot(name: &str) -> Result<DocumentSnapshot, FixtureError> {
    let path = fixture_path(name);
    let content = tokio::fs::read_to_string(&path).await?;

    if is_yaml(&path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(DocumentSnapshot::from_json(&content)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extensions() {
        for name in ["store.yaml", "store.yml", "STORE.YML", "store.Yaml"] {
            assert!(is_yaml(Path::new(name)), "{name}");
        }
        for name in ["store.json", "store", "yml"] {
            assert!(!is_yaml(Path::new(name)), "{name}");
        }
    }
}
