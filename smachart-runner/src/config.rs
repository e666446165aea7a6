//! Pipeline configuration: ticker, start date, SMA window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_SMA_WINDOW: i64 = 20;

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

/// The three values a pipeline run needs. Immutable once the run starts.
///
/// Loaded from TOML; any key left out keeps its default:
///
/// ```toml
/// ticker = "AAPL"
/// start_date = "2023-01-01"
/// sma_window = 20
/// ```
///
/// `sma_window` is kept as a raw integer; the indicator step rejects
/// values below 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub sma_window: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            start_date: default_start_date(),
            sma_window: DEFAULT_SMA_WINDOW,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PipelineConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load `explicit` if given (it must exist), else `fallback` if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        match fallback {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(config.sma_window, 20);
    }

    #[test]
    fn parses_full_toml() {
        let config = PipelineConfig::from_toml(
            r#"
            ticker = "MSFT"
            start_date = "2022-06-01"
            sma_window = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.ticker, "MSFT");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        assert_eq!(config.sma_window, 50);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = PipelineConfig::from_toml("sma_window = 5").unwrap();
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.sma_window, 5);
    }

    #[test]
    fn non_positive_window_is_not_a_config_error() {
        let config = PipelineConfig::from_toml("sma_window = 0").unwrap();
        assert_eq!(config.sma_window, 0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = PipelineConfig::from_toml("window = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = PipelineConfig::from_toml(r#"start_date = "01/01/2023""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn discover_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticker = \"SPY\"").unwrap();
        let config = PipelineConfig::discover(Some(file.path()), None).unwrap();
        assert_eq!(config.ticker, "SPY");
    }

    #[test]
    fn discover_missing_explicit_path_is_error() {
        let err = PipelineConfig::discover(Some(Path::new("/nonexistent/smachart.toml")), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn discover_missing_fallback_uses_defaults() {
        let config =
            PipelineConfig::discover(None, Some(Path::new("/nonexistent/smachart.toml"))).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }
}
