//! Report store: archive loading and merging with the live report
//!
//! The archive is a directory of JSON report documents. The store merges it
//! with an optional live report into one ascending, date-unique sequence.

pub mod archive;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::Report;

pub use archive::{load_archive, load_momentum_history};

/// Merge archive reports with an optional live report
///
/// The result is sorted ascending by date. A live report replaces any archive
/// report sharing its date; the archive copy is dropped, not merged. Duplicate
/// dates inside the archive keep the later entry in input order.
pub fn merge_reports(archive: Vec<Report>, live: Option<Report>) -> Vec<Report> {
    let mut by_date: BTreeMap<NaiveDate, Report> = BTreeMap::new();

    for report in archive {
        let date = report.date;
        if by_date.insert(date, report).is_some() {
            tracing::warn!(%date, "Duplicate archive report dropped");
        }
    }

    if let Some(report) = live {
        let date = report.date;
        if by_date.insert(date, report).is_some() {
            tracing::debug!(%date, "Live report supersedes archive entry");
        }
    }

    let merged: Vec<Report> = by_date.into_values().collect();
    tracing::debug!(count = merged.len(), "Merged report sequence");
    merged
}
