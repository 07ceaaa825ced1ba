//! Week-over-week comparison
//!
//! Reports are grouped by a week number computed within the date's own
//! calendar year, so there is no continuity across a year boundary. Groups
//! are ordered by their latest report date, and the two most recent groups
//! are compared.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{LevelId, Report};
use crate::utils::stats::{percent_change, rounded, safe_div};

/// Number of levels listed in `WeekMetrics::top_levels`
pub const TOP_LEVELS: usize = 3;

/// Week of the year, with weeks starting on Sunday and week 1 holding Jan 1
pub fn week_number(date: NaiveDate) -> u32 {
    let days_since_jan1 = date.ordinal0();
    let jan1 = date - Duration::days(i64::from(days_since_jan1));
    let offset = jan1.weekday().num_days_from_sunday();
    (days_since_jan1 + offset + 1).div_ceil(7)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    pub level: LevelId,
    pub count: u64,
}

/// Activity summary of one week group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMetrics {
    pub week_num: u32,
    pub total_events: u64,
    /// Average events per report in the week, rounded
    pub avg_events_per_day: i64,
    pub top_levels: Vec<LevelCount>,
    pub report_count: usize,
}

/// Current week against the previous week present in the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekComparison {
    pub current: WeekMetrics,
    pub previous: WeekMetrics,
    pub events_change: i64,
    pub avg_change: i64,
    pub report_count_change: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WeekOverWeek {
    /// Fewer than two distinct weeks
    #[default]
    InsufficientData,
    Compared(WeekComparison),
}

impl WeekOverWeek {
    pub fn comparison(&self) -> Option<&WeekComparison> {
        match self {
            Self::Compared(c) => Some(c),
            Self::InsufficientData => None,
        }
    }
}

/// Reports keyed by week number
pub fn group_by_week(reports: &[Report]) -> BTreeMap<u32, Vec<&Report>> {
    let mut weeks: BTreeMap<u32, Vec<&Report>> = BTreeMap::new();
    for report in reports {
        weeks.entry(week_number(report.date)).or_default().push(report);
    }
    weeks
}

pub fn week_metrics(week_num: u32, reports: &[&Report]) -> WeekMetrics {
    let mut per_level: BTreeMap<LevelId, u64> = BTreeMap::new();
    for bucket in reports.iter().flat_map(|r| &r.levels) {
        *per_level.entry(bucket.level).or_insert(0) += bucket.event_count;
    }

    let total_events: u64 = per_level.values().sum();
    let report_count = reports.len();

    let mut top_levels: Vec<LevelCount> = per_level
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();
    top_levels.sort_by(|a, b| b.count.cmp(&a.count));
    top_levels.truncate(TOP_LEVELS);

    WeekMetrics {
        week_num,
        total_events,
        avg_events_per_day: rounded(safe_div(total_events as f64, report_count as f64)),
        top_levels,
        report_count,
    }
}

/// Compare the two most recent week groups
pub fn compare_weeks(reports: &[Report]) -> WeekOverWeek {
    let weeks = group_by_week(reports);
    let mut ordered: Vec<(NaiveDate, u32, &Vec<&Report>)> = weeks
        .iter()
        .filter_map(|(&num, group)| group.iter().map(|r| r.date).max().map(|d| (d, num, group)))
        .collect();
    ordered.sort_by_key(|&(latest, num, _)| (latest, num));
    let mut recent = ordered.iter().rev();

    let (Some(&(_, current_num, current)), Some(&(_, previous_num, previous))) =
        (recent.next(), recent.next())
    else {
        tracing::debug!(weeks = weeks.len(), "Not enough weeks to compare");
        return WeekOverWeek::InsufficientData;
    };

    let current = week_metrics(current_num, current);
    let previous = week_metrics(previous_num, previous);

    WeekOverWeek::Compared(WeekComparison {
        events_change: percent_change(current.total_events as f64, previous.total_events as f64),
        avg_change: percent_change(
            current.avg_events_per_day as f64,
            previous.avg_events_per_day as f64,
        ),
        report_count_change: percent_change(
            current.report_count as f64,
            previous.report_count as f64,
        ),
        current,
        previous,
    })
}
