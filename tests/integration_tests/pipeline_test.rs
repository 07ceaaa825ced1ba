//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow:
//! 1. Archive on disk and live endpoint (mocked)
//! 2. Snapshot loading with fallback
//! 3. Dashboard derivation
//! 4. Snapshot cache behavior

use std::time::Duration;
use stratum::analytics::{Direction, WeekOverWeek};
use stratum::cache::SnapshotCache;
use stratum::catalog::Catalog;
use stratum::config::Config;
use stratum::loader::load_snapshot;
use stratum::models::{TrendCategory, Urgency};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{write_archive, LIVE_REPORT, MOMENTUM_HISTORY};

fn archive_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.source.archive_dir = dir.path().join("reports");
    std::fs::create_dir_all(&config.source.archive_dir).unwrap();
    write_archive(&config.source.archive_dir);
    config
}

// ============================================================================
// Complete Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_archive_only_dashboard() {
    let temp_dir = TempDir::new().unwrap();
    let config = archive_config(&temp_dir);

    let snapshot = load_snapshot(&config).await.unwrap();
    assert_eq!(snapshot.len(), 5);
    assert!(!snapshot.is_live);

    let catalog = Catalog::default();
    let mut cache = SnapshotCache::new();
    let dashboard = cache.get_or_build(&snapshot, &catalog, &config.engine);

    // heatmap columns follow report dates
    assert_eq!(dashboard.heatmap.len(), 5);
    assert_eq!(dashboard.heatmap.level_row(2), &[3, 0, 5, 0, 0]);

    // week 5 (10 events, 2 reports) against week 6 (15 events, 3 reports)
    let WeekOverWeek::Compared(cmp) = &dashboard.week_over_week else {
        panic!("expected two weeks");
    };
    assert_eq!(cmp.events_change, 50);
    assert_eq!(cmp.previous.avg_events_per_day, 5);
    assert_eq!(cmp.current.avg_events_per_day, 5);

    // shifts in the reports replace the fallback catalog
    let names: Vec<&str> = dashboard
        .trends
        .rising
        .iter()
        .chain(&dashboard.trends.falling)
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Energy-compute coupling"));
    let stable = dashboard
        .trends
        .falling
        .iter()
        .find(|t| t.name == "Bank intermediation")
        .unwrap();
    assert_eq!(stable.category, TrendCategory::Freezing);

    // three links in the latest report
    assert!(dashboard
        .forecasts
        .iter()
        .any(|f| f.confidence == 65 && f.direction == Direction::Up));

    assert_eq!(dashboard.weak_signals[0].urgency, Urgency::High);

    // "supply chain" appears twice in the corpus
    let supply = dashboard
        .programs
        .iter()
        .find(|p| p.key == "supply-chain")
        .unwrap();
    assert!(supply.score > 20);
}

#[tokio::test]
async fn test_live_report_overrides_archive_day() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = archive_config(&temp_dir);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIVE_REPORT))
        .mount(&mock_server)
        .await;
    config.source.live_url = Some(format!("{}/latest.json", mock_server.uri()));

    let snapshot = load_snapshot(&config).await.unwrap();

    assert!(snapshot.is_live);
    assert_eq!(snapshot.len(), 5);
    let latest = snapshot.latest().unwrap();
    assert_eq!(latest.event_count(8), Some(9));
    // the archive copy is dropped, not merged
    assert!(latest.structural_shifts.is_empty());
}

#[tokio::test]
async fn test_unreachable_live_source_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = archive_config(&temp_dir);
    config.source.live_url = Some("http://127.0.0.1:1/latest.json".to_string());
    config.source.fetch_timeout_secs = 1;

    let snapshot = load_snapshot(&config).await.unwrap();
    assert!(!snapshot.is_live);
    assert_eq!(snapshot.len(), 5);
    assert_eq!(config.fetch_timeout(), Duration::from_secs(1));
}

#[tokio::test]
async fn test_momentum_history_sparklines() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = archive_config(&temp_dir);

    let history = temp_dir.path().join("momentum.json");
    std::fs::write(&history, MOMENTUM_HISTORY).unwrap();
    config.source.momentum_history = Some(history);

    let snapshot = load_snapshot(&config).await.unwrap();
    let mut cache = SnapshotCache::new();
    let dashboard = cache.get_or_build(&snapshot, &Catalog::default(), &config.engine);

    assert_eq!(dashboard.sparklines.len(), 1);
    assert_eq!(dashboard.sparklines[0].name, "Energy-compute coupling");
    assert_eq!(dashboard.sparklines[0].points.len(), 2);
}

// ============================================================================
// Cache Tests
// ============================================================================

#[tokio::test]
async fn test_cache_hits_until_snapshot_changes() {
    let temp_dir = TempDir::new().unwrap();
    let config = archive_config(&temp_dir);
    let catalog = Catalog::default();
    let mut cache = SnapshotCache::new();

    let snapshot = load_snapshot(&config).await.unwrap();
    let first = cache.get_or_build(&snapshot, &catalog, &config.engine).clone();

    // reloading the same archive yields the same snapshot
    let reloaded = load_snapshot(&config).await.unwrap();
    let second = cache.get_or_build(&reloaded, &catalog, &config.engine).clone();
    assert_eq!(first, second);
    assert_eq!(cache.stats().hits, 1);

    // a new report day is a new snapshot
    std::fs::write(
        config.source.archive_dir.join("2024-02-12.json"),
        r#"{"date": "2024-02-12", "levels": [{"level": 1, "eventCount": 4}]}"#,
    )
    .unwrap();
    let grown = load_snapshot(&config).await.unwrap();
    let third = cache.get_or_build(&grown, &catalog, &config.engine);

    assert_eq!(third.report_count, 6);
    assert_eq!(cache.stats().misses, 2);
}
