//! Environment configuration for `rq-cli`.
//!
//! # Environment Variables
//!
//! - `ROOFQUOTE_SNAPSHOT` - Document snapshot path (default `roofquote-snapshot.json`)
//! - `ROOFQUOTE_LOG_FORMAT` - `text` (default) or `json`
//! - `RUST_LOG` - Log filter (default `roofquote_core=info,rq_cli=info`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_SNAPSHOT: &str = "roofquote-snapshot.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Snapshot read when a command gets no `--snapshot` flag.
    pub snapshot_path: PathBuf,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let snapshot_path = lookup("ROOFQUOTE_SNAPSHOT")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT), PathBuf::from);

        let log_format = match lookup("ROOFQUOTE_LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>().map_err(|e| {
                ConfigError::InvalidEnvVar("ROOFQUOTE_LOG_FORMAT".to_string(), e)
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            snapshot_path,
            log_format,
        })
    }

    /// The snapshot to read: the command-line path if given, else the
    /// configured one.
    #[must_use]
    pub fn snapshot(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.snapshot_path.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_reads_variables() {
        let config = CliConfig::from_lookup(lookup(&[
            ("ROOFQUOTE_SNAPSHOT", "/data/store.yaml"),
            ("ROOFQUOTE_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("/data/store.yaml"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_log_format() {
        let err = CliConfig::from_lookup(lookup(&[("ROOFQUOTE_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("ROOFQUOTE_LOG_FORMAT"));
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.snapshot(Some(PathBuf::from("other.json"))),
            PathBuf::from("other.json")
        );
        assert_eq!(config.snapshot(None), PathBuf::from(DEFAULT_SNAPSHOT));
    }
}
