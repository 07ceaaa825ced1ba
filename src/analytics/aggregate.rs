//! Cross-cutting summaries over a report sequence
//!
//! - Date x level intensity matrix (heatmap)
//! - Per-level cumulative activity
//! - Corpus text for keyword scoring
//! - Ranking of catalog tallies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::TallyEntry;
use crate::models::{is_valid_level, LevelId, Report, MAX_LEVEL, MIN_LEVEL};
use crate::utils::normalize_whitespace;

/// Intensities of one level across all report dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub level: LevelId,
    /// One value per heatmap date, same order as `Heatmap::dates`
    pub intensities: Vec<u64>,
}

/// Dense date x level matrix of event counts
///
/// Only dates that have a report appear as columns; no gap columns are
/// inserted for missing dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    dates: Vec<NaiveDate>,
    rows: Vec<HeatmapRow>,
}

impl Heatmap {
    /// Build the matrix from reports in ascending date order
    pub fn build(reports: &[Report]) -> Self {
        let dates: Vec<NaiveDate> = reports.iter().map(|r| r.date).collect();

        let rows = (MIN_LEVEL..=MAX_LEVEL)
            .map(|level| HeatmapRow {
                level,
                intensities: reports
                    .iter()
                    .map(|r| r.event_count(level).unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self { dates, rows }
    }

    /// Column dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Level rows, level 1 first
    pub fn rows(&self) -> &[HeatmapRow] {
        &self.rows
    }

    /// Number of date columns
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Intensities of a level, empty for ids outside the taxonomy
    pub fn level_row(&self, level: LevelId) -> &[u64] {
        self.rows
            .iter()
            .find(|row| row.level == level)
            .map(|row| row.intensities.as_slice())
            .unwrap_or(&[])
    }

    /// Intensity of a level on the column at `index`
    pub fn intensity(&self, index: usize, level: LevelId) -> u64 {
        self.level_row(level).get(index).copied().unwrap_or(0)
    }

    /// Per-date sum of the given levels
    pub fn combined_series(&self, levels: &[LevelId]) -> Vec<f64> {
        (0..self.len())
            .map(|index| {
                levels
                    .iter()
                    .map(|&level| self.intensity(index, level) as f64)
                    .sum()
            })
            .collect()
    }
}

/// Sum of event counts per level across all reports
pub fn level_activity(reports: &[Report]) -> BTreeMap<LevelId, u64> {
    let mut activity = BTreeMap::new();
    for bucket in reports.iter().flat_map(|r| &r.levels) {
        if !is_valid_level(bucket.level) {
            tracing::debug!(level = bucket.level, "Ignoring bucket outside level taxonomy");
            continue;
        }
        *activity.entry(bucket.level).or_insert(0) += bucket.event_count;
    }
    activity
}

/// Lowercased text of all event titles and descriptions
pub fn corpus_text(reports: &[Report]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for event in reports.iter().flat_map(|r| &r.levels).flat_map(|b| &b.events) {
        parts.push(&event.title);
        parts.push(&event.description);
    }
    normalize_whitespace(&parts.join(" ")).to_lowercase()
}

/// Highest counts first, ties keep catalog order
pub fn rank_tally(entries: &[TallyEntry], top_n: usize) -> Vec<TallyEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    ranked
}
