//! Error scenario integration tests
//!
//! Tests failure modes at the loading boundary:
//! 1. Malformed archive documents
//! 2. Invalid live URLs
//! 3. Invalid catalogs and configuration
//! 4. Degenerate report sequences

use std::path::PathBuf;
use stratum::analytics::build_dashboard;
use stratum::catalog::Catalog;
use stratum::config::{CatalogConfig, Config, EngineConfig};
use stratum::error::{Error, ErrorCategory, StratumErrorTrait};
use stratum::loader::load_snapshot;
use stratum::models::{ReportBundle, ReportSnapshot};
use tempfile::TempDir;

// ============================================================================
// Loading Errors
// ============================================================================

#[tokio::test]
async fn test_malformed_archive_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("2024-01-01.json"), r#"{"levels": []}"#).unwrap();

    let mut config = Config::default();
    config.source.archive_dir = temp_dir.path().to_path_buf();

    let err = load_snapshot(&config).await.unwrap_err();
    assert!(matches!(err, Error::Archive(_)));
    assert_eq!(err.category(), ErrorCategory::Parsing);
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_invalid_live_url() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.source.archive_dir = temp_dir.path().to_path_buf();
    config.source.live_url = Some("ftp://reports.example.com/latest".to_string());

    let err = load_snapshot(&config).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Config);
}

#[tokio::test]
async fn test_missing_momentum_history() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.source.archive_dir = temp_dir.path().to_path_buf();
    config.source.momentum_history = Some(temp_dir.path().join("missing.json"));

    let err = load_snapshot(&config).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Storage);
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_catalog_with_duplicate_levels() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r##"
[[levels]]
id = 1
name = "Resources"
color = "#8d6e63"
group = "material"

[[levels]]
id = 1
name = "Again"
color = "#000000"
group = "material"
"##,
    )
    .unwrap();

    let catalog = CatalogConfig { path: Some(path) }.load();
    assert!(matches!(catalog, Err(Error::Config(_))));
}

#[test]
fn test_catalog_with_broken_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.toml");
    std::fs::write(&path, "[[levels]\nid = ").unwrap();

    let err = CatalogConfig { path: Some(path) }.load().unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
    assert_eq!(err.category(), ErrorCategory::Parsing);
    assert!(!err.is_recoverable());
}

#[test]
fn test_catalog_file_missing() {
    let catalog = CatalogConfig {
        path: Some(PathBuf::from("/nonexistent/catalog.toml")),
    }
    .load();
    assert!(matches!(catalog, Err(Error::Io(_))));
}

#[test]
fn test_invalid_thresholds_rejected() {
    let mut config = Config::default();
    config.engine.forecast.max_forecasts = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.engine.forecast.significance_pct = 0.0;
    assert!(config.validate().is_err());
}

// ============================================================================
// Degenerate Inputs
// ============================================================================

#[test]
fn test_single_report_degrades_to_empty() {
    let snapshot = ReportSnapshot::from_bundle(ReportBundle {
        archive_reports: Vec::new(),
        live_report: Some(stratum::models::Report::new("2024-03-01".parse().unwrap())),
        is_live: true,
    });

    let dashboard = build_dashboard(&snapshot, &Catalog::default(), &EngineConfig::default());
    assert!(dashboard.has_reports());
    assert!(dashboard.forecasts.is_empty());
    assert!(dashboard.week_over_week.comparison().is_none());
    assert!(dashboard.programs.iter().all(|p| p.score == 20));
}
