//! Serializable run configuration.
//!
//! Stored as TOML. Every field has a default, so an empty file is a valid
//! config pointing at `fear_greed_index.csv` and `historical_data.csv` in the
//! config's own directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level config: one section per dataset plus report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreakLabConfig {
    pub sentiment: SentimentSource,
    pub trades: TradeSource,
    pub report: ReportConfig,
}

/// Fear & Greed index CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SentimentSource {
    pub path: PathBuf,
    /// Remove rows whose classification does not map to Fear/Neutral/Greed
    /// before scanning. When false they form `Unclassified` streaks.
    pub drop_unclassified: bool,
}

impl Default for SentimentSource {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fear_greed_index.csv"),
            drop_unclassified: false,
        }
    }
}

/// Trade history CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TradeSource {
    pub path: PathBuf,
    pub timestamp_column: String,
    pub pnl_column: String,
    /// chrono format string for `timestamp_column`.
    pub timestamp_format: String,
}

impl Default for TradeSource {
    fn default() -> Self {
        Self {
            path: PathBuf::from("historical_data.csv"),
            timestamp_column: "Timestamp IST".into(),
            pnl_column: "Closed PnL".into(),
            timestamp_format: "%d-%m-%Y %H:%M".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Streaks at least this long are listed as extreme periods.
    pub min_length: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { min_length: 5 }
    }
}

impl StreakLabConfig {
    /// Load a config file. Relative dataset paths resolve against the
    /// directory containing the file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.min_length == 0 {
            return Err(ConfigError::Invalid(
                "report.min_length must be at least 1".into(),
            ));
        }
        if self.trades.timestamp_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "trades.timestamp_column must not be empty".into(),
            ));
        }
        if self.trades.pnl_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "trades.pnl_column must not be empty".into(),
            ));
        }
        if self.trades.timestamp_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "trades.timestamp_format must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.sentiment.path.is_relative() {
            self.sentiment.path = base.join(&self.sentiment.path);
        }
        if self.trades.path.is_relative() {
            self.trades.path = base.join(&self.trades.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = StreakLabConfig::from_toml("").unwrap();
        assert_eq!(config, StreakLabConfig::default());
        assert_eq!(config.report.min_length, 5);
        assert_eq!(config.trades.pnl_column, "Closed PnL");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = StreakLabConfig::from_toml(
            r#"
            [sentiment]
            drop_unclassified = true

            [report]
            min_length = 3
            "#,
        )
        .unwrap();
        assert!(config.sentiment.drop_unclassified);
        assert_eq!(config.sentiment.path, PathBuf::from("fear_greed_index.csv"));
        assert_eq!(config.report.min_length, 3);
        assert_eq!(config.trades.timestamp_format, "%d-%m-%Y %H:%M");
    }

    #[test]
    fn zero_min_length_is_rejected() {
        let err = StreakLabConfig::from_toml("[report]\nmin_length = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn blank_column_is_rejected() {
        let err = StreakLabConfig::from_toml("[trades]\npnl_column = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("pnl_column"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = StreakLabConfig::from_toml("[report\nmin_length = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = StreakLabConfig::default();
        config.report.min_length = 7;
        config.trades.path = PathBuf::from("data/trades.csv");
        let text = config.to_toml().unwrap();
        assert_eq!(StreakLabConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let mut config = StreakLabConfig::default();
        config.trades.path = PathBuf::from("/abs/trades.csv");
        config.resolve_paths(Path::new("/data/run"));
        assert_eq!(
            config.sentiment.path,
            PathBuf::from("/data/run/fear_greed_index.csv")
        );
        assert_eq!(config.trades.path, PathBuf::from("/abs/trades.csv"));
    }
}
