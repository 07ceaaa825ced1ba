//! Per-snapshot memoization of the derived dashboard
//!
//! The cache holds a single entry keyed by a SHA256 over the snapshot
//! fingerprint and the reference data the derivations read. A request with a
//! different key replaces the entry, so a new snapshot always recomputes.
//!
//! # Example
//!
//! ```rust,ignore
//! use stratum::cache::SnapshotCache;
//!
//! let mut cache = SnapshotCache::new();
//! let dashboard = cache.get_or_build(&snapshot, &catalog, &engine);
//! ```

use sha2::{Digest, Sha256};

use crate::analytics::{build_dashboard, Dashboard};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::metrics;
use crate::models::ReportSnapshot;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cache hits
    pub hits: u64,
    /// Total cache misses
    pub misses: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Entry {
    key: String,
    dashboard: Dashboard,
}

/// Single-entry dashboard cache
#[derive(Default)]
pub struct SnapshotCache {
    entry: Option<Entry>,
    stats: CacheStats,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key over the snapshot and everything the derivations depend on
    pub fn cache_key(snapshot: &ReportSnapshot, catalog: &Catalog, engine: &EngineConfig) -> String {
        let mut hasher = Sha256::new();
        hasher.update(snapshot.fingerprint().as_bytes());
        if let Ok(bytes) = serde_json::to_vec(catalog) {
            hasher.update(&bytes);
        }
        if let Ok(bytes) = serde_json::to_vec(engine) {
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Return the cached dashboard for this input, deriving it on a miss
    pub fn get_or_build(
        &mut self,
        snapshot: &ReportSnapshot,
        catalog: &Catalog,
        engine: &EngineConfig,
    ) -> &Dashboard {
        let key = Self::cache_key(snapshot, catalog, engine);

        let entry = match self.entry.take() {
            Some(entry) if entry.key == key => {
                self.stats.hits += 1;
                metrics::record_cache_lookup(true);
                tracing::debug!(key = %&key[..12], "Snapshot cache hit");
                entry
            }
            _ => {
                self.stats.misses += 1;
                metrics::record_cache_lookup(false);
                tracing::info!(key = %&key[..12], reports = snapshot.len(), "Snapshot changed, recomputing");
                let _timer = metrics::start_derivation_timer("dashboard");
                let dashboard = build_dashboard(snapshot, catalog, engine);
                Entry { key, dashboard }
            }
        };

        &self.entry.insert(entry).dashboard
    }

    /// Key of the cached entry
    pub fn current_key(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.key.as_str())
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("Snapshot cache invalidated");
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
