//! stratum - Temporal analytics over level-structured intelligence reports
//!
//! Dated reports bucket events into nine economic levels, from concrete
//! resources up to abstract capital. The engine merges archived and live
//! reports into one snapshot and derives heatmaps, trend momentum, forecasts,
//! week-over-week deltas and program relevance from it.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`] - Report data model and snapshots
//! - [`storage`] - Archive reading and the report store merge
//! - [`loader`] - Live fetch with archive fallback
//! - [`analytics`] - Pure derivations (aggregate, momentum, forecast, weekly, relevance)
//! - [`cache`] - Per-snapshot memoization of the dashboard
//! - [`catalog`] - Level taxonomy, programs, fallback trends and tallies
//! - [`config`] - Configuration management and settings
//! - [`metrics`] - Prometheus counters
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use stratum::cache::SnapshotCache;
//! use stratum::config::Config;
//! use stratum::loader::load_snapshot;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let catalog = config.catalog.load()?;
//!     let snapshot = load_snapshot(&config).await?;
//!
//!     let mut cache = SnapshotCache::new();
//!     let dashboard = cache.get_or_build(&snapshot, &catalog, &config.engine);
//!     println!("{} forecasts", dashboard.forecasts.len());
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod analytics;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod summary;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{build_dashboard, Dashboard, Forecast, TrendDynamic, WeekOverWeek};
    pub use crate::cache::SnapshotCache;
    pub use crate::catalog::Catalog;
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, StratumErrorTrait};
    pub use crate::models::{Report, ReportBundle, ReportSnapshot};
}

// Direct re-exports for convenience
pub use models::{Report, ReportBundle, ReportSnapshot};
