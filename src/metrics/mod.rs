//! Prometheus metrics for stratum
//!
//! This module provides metrics tracking for:
//! - Derivations: runs and duration per component
//! - Snapshot cache: hits and misses
//! - Loading: reports read per source, live fetch outcomes
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_gauge, register_histogram_vec, CounterVec, Encoder, Gauge,
    HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all engine metrics
struct EngineMetrics {
    derivations: CounterVec,
    derivation_duration: HistogramVec,
    cache_lookups: CounterVec,
    reports_loaded: CounterVec,
    live_fetches: CounterVec,
    snapshot_reports: Gauge,
}

/// Global storage for engine metrics
static ENGINE_METRICS: OnceLock<EngineMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Outcome label of a live fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveFetchOutcome {
    /// Live report fetched and used
    Live,
    /// Fetch failed, archive-only mode
    Fallback,
    /// No live source configured
    Disabled,
}

impl LiveFetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
            Self::Disabled => "disabled",
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; only the first call registers anything.
///
/// ```ignore
/// if let Err(e) = stratum::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let engine = EngineMetrics {
        derivations: register_counter_vec!(
            "stratum_derivations_total",
            "Total derivation runs by component",
            &["component"]
        )?,
        derivation_duration: register_histogram_vec!(
            "stratum_derivation_duration_seconds",
            "Derivation duration in seconds",
            &["component"],
            vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
        )?,
        cache_lookups: register_counter_vec!(
            "stratum_cache_lookups_total",
            "Snapshot cache lookups by result",
            &["result"]
        )?,
        reports_loaded: register_counter_vec!(
            "stratum_reports_loaded_total",
            "Reports loaded by source",
            &["source"]
        )?,
        live_fetches: register_counter_vec!(
            "stratum_live_fetches_total",
            "Live report fetches by outcome",
            &["outcome"]
        )?,
        snapshot_reports: register_gauge!(
            "stratum_snapshot_reports",
            "Number of reports in the current snapshot"
        )?,
    };

    ENGINE_METRICS
        .set(engine)
        .map_err(|_| "Engine metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    ENGINE_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Count a derivation run and time it until the guard drops
pub fn start_derivation_timer(component: &str) -> MetricsTimer {
    match ENGINE_METRICS.get() {
        Some(m) => {
            m.derivations.with_label_values(&[component]).inc();
            MetricsTimer::new(
                m.derivation_duration
                    .with_label_values(&[component])
                    .start_timer(),
            )
        }
        None => MetricsTimer::noop(),
    }
}

/// Record a snapshot cache lookup
pub fn record_cache_lookup(hit: bool) {
    if let Some(m) = ENGINE_METRICS.get() {
        let result = if hit { "hit" } else { "miss" };
        m.cache_lookups.with_label_values(&[result]).inc();
    }
}

/// Record reports read from a source (`archive` or `live`)
pub fn record_reports_loaded(source: &str, count: usize) {
    let Some(m) = ENGINE_METRICS.get() else {
        return;
    };

    if count > 0 {
        m.reports_loaded
            .with_label_values(&[source])
            .inc_by(count as f64);
    }
}

/// Record the outcome of a live fetch
pub fn record_live_fetch(outcome: LiveFetchOutcome) {
    if let Some(m) = ENGINE_METRICS.get() {
        m.live_fetches.with_label_values(&[outcome.as_str()]).inc();
    }
}

/// Update the current snapshot size
pub fn update_snapshot_size(reports: usize) {
    if let Some(m) = ENGINE_METRICS.get() {
        m.snapshot_reports.set(reports as f64);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ensure_metrics_initialized() {
        let _ = init_metrics();
    }

    #[test]
    fn test_init_metrics() {
        assert!(init_metrics().is_ok());
        // idempotent
        assert!(init_metrics().is_ok());
    }

    #[test]
    fn test_metrics_initialized() {
        ensure_metrics_initialized();
        assert!(metrics_initialized());
    }

    #[test]
    fn test_encode_metrics() {
        ensure_metrics_initialized();
        record_cache_lookup(true);
        let text = encode_metrics().unwrap();
        assert!(text.contains("stratum_cache_lookups_total"));
    }

    #[test]
    fn test_recording_does_not_panic() {
        ensure_metrics_initialized();
        record_reports_loaded("archive", 12);
        record_reports_loaded("live", 0);
        record_live_fetch(LiveFetchOutcome::Fallback);
        update_snapshot_size(12);
        let _timer = start_derivation_timer("forecast");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(LiveFetchOutcome::Live.as_str(), "live");
        assert_eq!(LiveFetchOutcome::Disabled.as_str(), "disabled");
    }
}
