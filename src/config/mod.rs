//! Configuration management for stratum
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Engine thresholds default to the values the
//! dashboard has always used; overriding them is mainly useful for testing
//! catalogs and archives with unusual density.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::Catalog;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where reports come from
    pub source: SourceConfig,

    /// Derivation thresholds
    pub engine: EngineConfig,

    /// Catalog override
    pub catalog: CatalogConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Report source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of archived report documents
    pub archive_dir: PathBuf,

    /// Endpoint serving the latest report as JSON
    pub live_url: Option<String>,

    /// Live fetch timeout in seconds
    pub fetch_timeout_secs: u64,

    /// JSON file with named momentum history (kept outside the archive directory)
    pub momentum_history: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            archive_dir: PathBuf::from("data/reports"),
            live_url: None,
            fetch_timeout_secs: 10,
            momentum_history: None,
        }
    }
}

/// Thresholds for all derivations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub relevance: RelevanceConfig,
    pub tallies: TallyConfig,
}

/// Forecast engine thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of trailing reports forming the recent window
    pub recent_window: usize,

    /// Minimum absolute percent change for a forecast
    pub significance_pct: f64,

    /// Confidence before the change bonus
    pub base_confidence: f64,

    /// Confidence added per percentage point of change
    pub confidence_per_pct: f64,

    /// Confidence ceiling
    pub max_confidence: f64,

    /// Cross-level links in the latest report needed for the integration forecast
    pub cross_link_threshold: usize,

    /// Confidence of the integration forecast
    pub cross_link_confidence: u8,

    /// Maximum number of forecasts returned
    pub max_forecasts: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            recent_window: 3,
            significance_pct: 15.0,
            base_confidence: 50.0,
            confidence_per_pct: 0.5,
            max_confidence: 90.0,
            cross_link_threshold: 2,
            cross_link_confidence: 65,
            max_forecasts: 6,
        }
    }
}

/// Relevance scorer weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Points per keyword occurrence
    pub keyword_weight: f64,

    /// Cap on keyword points
    pub keyword_cap: f64,

    /// Points per unit of level activity
    pub activity_weight: f64,

    /// Cap on activity points
    pub activity_cap: f64,

    /// Points every program receives
    pub baseline: f64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 3.0,
            keyword_cap: 40.0,
            activity_weight: 2.0,
            activity_cap: 40.0,
            baseline: 20.0,
        }
    }
}

/// Theme/company tally output size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub top_n: usize,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML file overriding the built-in catalog
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog, or the built-in one
    pub fn load(&self) -> crate::error::Result<Catalog> {
        match &self.path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::default()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl LoggingConfig {
    const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// `EnvFilter` directive for this crate; `verbose` forces debug
    pub fn filter_directive(&self, verbose: bool) -> String {
        if verbose {
            String::from("stratum=debug,info")
        } else {
            format!("stratum={},warn", self.level.to_ascii_lowercase())
        }
    }

    /// Output format, with a command-line override taking precedence
    pub fn resolved_format<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.unwrap_or(&self.format)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let archive_dir = std::env::var("STRATUM_ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.source.archive_dir);

        let live_url = std::env::var("STRATUM_LIVE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let fetch_timeout_secs = std::env::var("STRATUM_FETCH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.source.fetch_timeout_secs);

        let momentum_history = std::env::var("STRATUM_MOMENTUM_HISTORY").ok().map(PathBuf::from);

        let catalog_path = std::env::var("STRATUM_CATALOG_PATH").ok().map(PathBuf::from);

        let log_level =
            std::env::var("STRATUM_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("STRATUM_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            source: SourceConfig {
                archive_dir,
                live_url,
                fetch_timeout_secs,
                momentum_history,
            },
            engine: defaults.engine,
            catalog: CatalogConfig { path: catalog_path },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.fetch_timeout_secs == 0 {
            anyhow::bail!("fetch_timeout_secs must be greater than 0");
        }

        let forecast = &self.engine.forecast;
        if forecast.recent_window == 0 {
            anyhow::bail!("forecast.recent_window must be greater than 0");
        }
        if forecast.significance_pct <= 0.0 {
            anyhow::bail!("forecast.significance_pct must be positive");
        }
        if forecast.max_forecasts == 0 {
            anyhow::bail!("forecast.max_forecasts must be greater than 0");
        }
        if !(0.0..=100.0).contains(&forecast.max_confidence) {
            anyhow::bail!("forecast.max_confidence must be within 0-100");
        }
        if forecast.cross_link_confidence > 100 {
            anyhow::bail!("forecast.cross_link_confidence must be within 0-100");
        }

        let relevance = &self.engine.relevance;
        if relevance.keyword_cap < 0.0 || relevance.activity_cap < 0.0 {
            anyhow::bail!("relevance caps must not be negative");
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LoggingConfig::LEVELS.contains(&level.as_str()) {
            anyhow::bail!("logging.level must be one of {:?}", LoggingConfig::LEVELS);
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be text or json");
        }

        Ok(())
    }

    /// Get live fetch timeout as Duration
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_filter_follows_level() {
        let logging = LoggingConfig {
            level: String::from("DEBUG"),
            format: String::from("json"),
        };
        assert_eq!(logging.filter_directive(false), "stratum=debug,warn");
        assert_eq!(LoggingConfig::default().filter_directive(false), "stratum=info,warn");
        assert_eq!(LoggingConfig::default().filter_directive(true), "stratum=debug,info");
    }

    #[test]
    fn test_logging_format_flag_overrides_config() {
        let logging = LoggingConfig {
            level: String::from("info"),
            format: String::from("json"),
        };
        assert_eq!(logging.resolved_format(None), "json");
        assert_eq!(logging.resolved_format(Some("text")), "text");
    }

    #[test]
    fn test_unknown_logging_values_rejected() {
        let mut config = Config::default();
        config.logging.level = String::from("loud");
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = String::from("xml");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.source.fetch_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_confidence_cap_out_of_range() {
        let mut config = Config::default();
        config.engine.forecast.max_confidence = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fetch_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[engine.forecast]
max_forecasts = 4
"#,
        )
        .unwrap();

        assert_eq!(config.engine.forecast.max_forecasts, 4);
        assert_eq!(config.engine.forecast.recent_window, 3);
        assert_eq!(config.engine.relevance.baseline, 20.0);
        assert_eq!(config.source.archive_dir, PathBuf::from("data/reports"));
    }

    #[test]
    fn test_builtin_catalog_when_no_path() {
        let catalog = CatalogConfig::default().load().unwrap();
        assert_eq!(catalog.levels.len(), 9);
    }
}
