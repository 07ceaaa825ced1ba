//! Report loading with live fetch and archive fallback
//!
//! The loader is the only asynchronous part of the crate. It reads the
//! archive, tries the live source, and hands a [`ReportBundle`] to the store.
//! A live failure never fails the load: the bundle is archive-only and
//! `is_live` is false.

pub mod fetcher;

pub use fetcher::HttpLiveSource;

use async_trait::async_trait;
use std::io;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::metrics::{self, LiveFetchOutcome};
use crate::models::{Report, ReportBundle, ReportSnapshot};
use crate::storage::{load_archive, load_momentum_history};
use crate::utils::error::{ArchiveError, FetchError};

/// Source of the most recent report
#[async_trait]
pub trait LiveSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetch the latest report
    async fn fetch_latest(&self) -> std::result::Result<Report, FetchError>;
}

/// Read the archive; a missing directory is an empty archive
fn read_archive(dir: &Path) -> Result<Vec<Report>> {
    match load_archive(dir) {
        Ok(reports) => Ok(reports),
        Err(ArchiveError::Directory { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "Archive directory not found, starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Load the archive and try the live source
///
/// # Errors
///
/// Returns an error only when the archive cannot be read.
pub async fn load_bundle(archive_dir: &Path, live: Option<&dyn LiveSource>) -> Result<ReportBundle> {
    let archive_reports = read_archive(archive_dir)?;
    metrics::record_reports_loaded("archive", archive_reports.len());

    let Some(source) = live else {
        metrics::record_live_fetch(LiveFetchOutcome::Disabled);
        return Ok(ReportBundle {
            archive_reports,
            live_report: None,
            is_live: false,
        });
    };

    match source.fetch_latest().await {
        Ok(report) => {
            tracing::info!(source = source.name(), date = %report.date, "Using live report");
            metrics::record_reports_loaded("live", 1);
            metrics::record_live_fetch(LiveFetchOutcome::Live);
            Ok(ReportBundle {
                archive_reports,
                live_report: Some(report),
                is_live: true,
            })
        }
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                error = %e,
                "Live fetch failed, falling back to archive"
            );
            metrics::record_live_fetch(LiveFetchOutcome::Fallback);
            Ok(ReportBundle {
                archive_reports,
                live_report: None,
                is_live: false,
            })
        }
    }
}

/// Build a snapshot from configuration
///
/// # Errors
///
/// Returns an error when the archive or momentum history cannot be read, or
/// the live URL is invalid.
pub async fn load_snapshot(config: &Config) -> Result<ReportSnapshot> {
    let source = match &config.source.live_url {
        Some(url) => Some(HttpLiveSource::new(url, config.fetch_timeout())?),
        None => None,
    };

    let bundle = load_bundle(
        &config.source.archive_dir,
        source.as_ref().map(|s| s as &dyn LiveSource),
    )
    .await?;

    let history = match &config.source.momentum_history {
        Some(path) => load_momentum_history(path)?,
        None => Vec::new(),
    };

    let snapshot = ReportSnapshot::from_bundle(bundle).with_momentum_history(history);
    metrics::update_snapshot_size(snapshot.len());

    tracing::info!(
        reports = snapshot.len(),
        is_live = snapshot.is_live,
        latest = ?snapshot.latest().map(|r| r.date),
        "Snapshot ready"
    );
    Ok(snapshot)
}
