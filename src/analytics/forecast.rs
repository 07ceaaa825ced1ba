//! Forecasts from recent-vs-earlier activity per level
//!
//! For each level the event-count series is split into a trailing window and
//! everything before it. A significant relative change produces a directional
//! forecast; a dense set of cross-level links in the latest report produces
//! an integration forecast. Never fails: short sequences yield no forecasts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::LevelTaxonomy;
use crate::config::ForecastConfig;
use crate::models::{is_valid_level, LevelId, Report};
use crate::utils::stats::{mean, rounded};

/// Forecast direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// A ranked forecast statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub title: String,
    pub direction: Direction,
    /// 0-100
    pub confidence: u8,
    pub description: String,
    pub based_on: String,
}

/// Title of the cross-level integration forecast
pub const INTEGRATION_TITLE: &str = "Cross-level integration strengthening";

/// Relative change between the trailing window and the earlier values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowChange {
    pub earlier_avg: f64,
    pub recent_avg: f64,
    pub change_pct: f64,
}

/// Compare the last `window` values with the values before them
///
/// The earlier part always holds at least the first value, so with a short
/// series the two windows overlap. Returns `None` for fewer than two values
/// or a zero earlier average.
pub fn window_change(series: &[u64], window: usize) -> Option<WindowChange> {
    let n = series.len();
    if n < 2 {
        return None;
    }

    let recent_start = n.saturating_sub(window);
    let earlier_end = recent_start.max(1);

    let to_f64 = |values: &[u64]| values.iter().map(|&v| v as f64).collect::<Vec<f64>>();
    let earlier_avg = mean(&to_f64(&series[..earlier_end]));
    let recent_avg = mean(&to_f64(&series[recent_start..]));

    if earlier_avg == 0.0 {
        return None;
    }

    let change_pct = (recent_avg - earlier_avg) / earlier_avg * 100.0;
    change_pct.is_finite().then_some(WindowChange {
        earlier_avg,
        recent_avg,
        change_pct,
    })
}

/// Event-count series of a level, only from reports that carry it
fn level_series(reports: &[&Report], level: LevelId) -> Vec<u64> {
    reports.iter().filter_map(|r| r.event_count(level)).collect()
}

fn level_forecast(
    level: LevelId,
    series: &[u64],
    levels: &LevelTaxonomy,
    config: &ForecastConfig,
) -> Option<Forecast> {
    let change = window_change(series, config.recent_window)?;
    let magnitude = change.change_pct.abs();
    if magnitude <= config.significance_pct {
        return None;
    }

    let direction = if change.change_pct > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    let confidence = (config.base_confidence + magnitude * config.confidence_per_pct)
        .min(config.max_confidence);

    let name = levels.name(level);
    let verb = match direction {
        Direction::Up => "rising",
        Direction::Down => "cooling",
    };
    let recent_len = series.len().min(config.recent_window);

    Some(Forecast {
        title: format!("{name} activity {verb}"),
        direction,
        confidence: rounded(confidence).clamp(0, 100) as u8,
        description: format!(
            "{name} averaged {:.1} events over the last {recent_len} reports against {:.1} before ({:+.0}%)",
            change.recent_avg, change.earlier_avg, change.change_pct
        ),
        based_on: format!("L{level} {name}, {} reports", series.len()),
    })
}

fn integration_forecast(latest: &Report, config: &ForecastConfig) -> Option<Forecast> {
    let links = latest.cross_level_links.len();
    if links <= config.cross_link_threshold {
        return None;
    }

    Some(Forecast {
        title: INTEGRATION_TITLE.to_string(),
        direction: Direction::Up,
        confidence: config.cross_link_confidence.min(100),
        description: format!("{links} cross-level links in the latest report tie levels closer together"),
        based_on: format!("Cross-level links, {}", latest.date),
    })
}

/// Ranked forecasts for a report sequence
///
/// Sorted by confidence descending (ties keep level order) and capped at
/// `config.max_forecasts`.
pub fn forecast(reports: &[Report], levels: &LevelTaxonomy, config: &ForecastConfig) -> Vec<Forecast> {
    let mut ordered: Vec<&Report> = reports.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let present: BTreeSet<LevelId> = ordered
        .iter()
        .flat_map(|r| r.levels.iter().map(|b| b.level))
        .filter(|&level| is_valid_level(level))
        .collect();

    let mut forecasts: Vec<Forecast> = present
        .into_iter()
        .filter_map(|level| level_forecast(level, &level_series(&ordered, level), levels, config))
        .collect();

    if let Some(latest) = ordered.last() {
        forecasts.extend(integration_forecast(latest, config));
    }

    forecasts.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    forecasts.truncate(config.max_forecasts);

    tracing::debug!(count = forecasts.len(), reports = reports.len(), "Derived forecasts");
    forecasts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrossLevelLink, LevelBucket};
    use chrono::{Duration, NaiveDate};

    fn series_reports(level: LevelId, counts: &[u64]) -> Vec<Report> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, &event_count)| {
                let mut r = Report::new(start + Duration::days(7 * i as i64));
                r.levels.push(LevelBucket {
                    level,
                    event_count,
                    events: Vec::new(),
                });
                r
            })
            .collect()
    }

    fn run(reports: &[Report]) -> Vec<Forecast> {
        forecast(reports, &LevelTaxonomy::default(), &ForecastConfig::default())
    }

    #[test]
    fn test_empty_and_single_report() {
        assert!(run(&[]).is_empty());
        assert!(run(&series_reports(6, &[4])).is_empty());
    }

    #[test]
    fn test_window_slicing() {
        // earlier [2], recent [2, 2, 10]
        let change = window_change(&[2, 2, 2, 10], 3).unwrap();
        assert!((change.earlier_avg - 2.0).abs() < 1e-9);
        assert!((change.recent_avg - 14.0 / 3.0).abs() < 1e-9);

        // two points: earlier [2], recent [2, 10]
        let short = window_change(&[2, 10], 3).unwrap();
        assert!((short.earlier_avg - 2.0).abs() < 1e-9);
        assert!((short.recent_avg - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_significant_rise() {
        let forecasts = run(&series_reports(6, &[2, 2, 2, 10]));
        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].direction, Direction::Up);
        assert_eq!(forecasts[0].confidence, 90);
        assert_eq!(forecasts[0].title, "Technology activity rising");
    }

    #[test]
    fn test_significant_fall() {
        // earlier [10, 10], recent [6, 6, 6] -> -40% -> confidence 70
        let forecasts = run(&series_reports(2, &[10, 10, 6, 6, 6]));
        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].direction, Direction::Down);
        assert_eq!(forecasts[0].confidence, 70);
    }

    #[test]
    fn test_small_change_is_ignored() {
        // earlier [10], recent [10, 11, 11] -> +6.7%
        assert!(run(&series_reports(3, &[10, 10, 11, 11])).is_empty());
    }

    #[test]
    fn test_zero_base_is_skipped() {
        assert!(run(&series_reports(3, &[0, 0, 5, 9])).is_empty());
    }

    #[test]
    fn test_integration_forecast() {
        let mut reports = series_reports(1, &[5, 5]);
        let link = CrossLevelLink {
            from_level: 1,
            to_level: 9,
            description: String::new(),
        };
        reports[1].cross_level_links = vec![link.clone(), link.clone(), link];

        let forecasts = run(&reports);
        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].title, INTEGRATION_TITLE);
        assert_eq!(forecasts[0].confidence, 65);
        assert_eq!(forecasts[0].direction, Direction::Up);
    }

    #[test]
    fn test_cap_and_ordering() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let reports: Vec<Report> = (0..4)
            .map(|i| {
                let mut r = Report::new(start + Duration::days(7 * i));
                for level in 1..=9u8 {
                    let count = if i == 3 { 2 + u64::from(level) } else { 2 };
                    r.levels.push(LevelBucket {
                        level,
                        event_count: count,
                        events: Vec::new(),
                    });
                }
                r
            })
            .collect();

        let forecasts = run(&reports);
        assert_eq!(forecasts.len(), 6);
        assert!(forecasts.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn test_absent_level_is_not_zero() {
        // the second report never mentions level 6
        let mut reports = series_reports(6, &[4, 0, 4, 4]);
        reports[1].levels.clear();

        let refs: Vec<&Report> = reports.iter().collect();
        assert_eq!(level_series(&refs, 6), vec![4, 4, 4]);
        // counting the gap as 0 would read as a -33% drop
        assert!(run(&reports).is_empty());
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let mut reports = series_reports(6, &[2, 2, 2, 10]);
        reports.reverse();
        let forecasts = run(&reports);
        assert_eq!(forecasts[0].direction, Direction::Up);
    }
}
