//! Trend momentum derivation
//!
//! This module provides:
//! - Split-half momentum of a numeric series
//! - Synthetic per-trend series built from the heatmap
//! - Trend dynamics from structural shifts, with a fallback catalog
//! - Sparkline history from externally supplied momentum rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregate::Heatmap;
use crate::catalog::FallbackTrend;
use crate::models::{
    LevelId, MomentumEntry, Report, ShiftTrend, StructuralShift, TrendCategory,
};
use crate::utils::slugify;
use crate::utils::stats::{mean, rounded};

/// Drift added per column for accelerating shifts
const ACCELERATING_DRIFT: f64 = 0.3;

/// Drift added per column for emerging shifts
const EMERGING_DRIFT: f64 = 0.15;

/// Drift subtracted per column for every other label
const DECLINING_DRIFT: f64 = 0.2;

/// Floor for declining synthetic values
const DECLINING_FLOOR: f64 = 1.0;

/// Split-half momentum of a chronological series, as a rounded percentage
///
/// The series is split at `max(1, n / 2)`. The earlier mean is floored at 1
/// when used as the base, so quiet early periods do not blow up the ratio.
/// Fewer than two values, or a non-finite result, give 0.
pub fn compute_momentum(values: &[f64]) -> i64 {
    if values.len() < 2 {
        return 0;
    }

    let mid = (values.len() / 2).max(1);
    let (first, second) = values.split_at(mid);

    let first_avg = mean(first);
    let second_avg = if second.is_empty() {
        first_avg
    } else {
        mean(second)
    };

    let base = first_avg.max(1.0);
    rounded((second_avg - first_avg) / base * 100.0)
}

/// One point of a synthetic trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Build the synthetic activity series of a trend
///
/// Sums the heatmap values of `levels` for every date, then applies a linear
/// drift in the declared direction: accelerating `+0.3 * i`, emerging
/// `+0.15 * i`, anything else `max(1, v - 0.2 * i)`.
///
/// This is a heuristic smoothing filter. Raw event counts over a short report
/// window are too noisy to show a visible direction, so the drift exaggerates
/// the declared one. It is not a statistical estimator and not a forecast.
pub fn generate_trend_data(heatmap: &Heatmap, levels: &[LevelId], trend: ShiftTrend) -> Vec<TrendPoint> {
    heatmap
        .dates()
        .iter()
        .zip(heatmap.combined_series(levels))
        .enumerate()
        .map(|(index, (&date, value))| {
            let i = index as f64;
            let value = match trend {
                ShiftTrend::Accelerating => value + ACCELERATING_DRIFT * i,
                ShiftTrend::Emerging => value + EMERGING_DRIFT * i,
                ShiftTrend::Decelerating | ShiftTrend::Stable => {
                    (value - DECLINING_DRIFT * i).max(DECLINING_FLOOR)
                }
            };
            TrendPoint { date, value }
        })
        .collect()
}

/// A trend with its derived momentum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDynamic {
    pub id: String,
    pub name: String,
    pub levels: Vec<LevelId>,
    pub category: TrendCategory,
    pub momentum: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_to: Option<String>,
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl TrendDynamic {
    /// Derive a trend from a structural shift and the heatmap
    pub fn from_shift(shift: &StructuralShift, heatmap: &Heatmap) -> Self {
        let series: Vec<f64> = generate_trend_data(heatmap, &shift.levels, shift.trend)
            .into_iter()
            .map(|p| p.value)
            .collect();

        Self {
            id: slugify(&shift.title),
            name: shift.title.clone(),
            levels: shift.levels.clone(),
            category: TrendCategory::from_shift(shift.trend),
            momentum: compute_momentum(&series),
            rationale: non_empty(&shift.mechanism),
            shift_from: non_empty(&shift.from),
            shift_to: non_empty(&shift.to),
        }
    }

    /// Take a fallback trend as is; named history, when present, refreshes momentum
    pub fn from_fallback(trend: &FallbackTrend, history: &[MomentumEntry]) -> Self {
        Self {
            id: trend.id.clone(),
            name: trend.name.clone(),
            levels: trend.levels.clone(),
            category: trend.category,
            momentum: momentum_from_history(history, &trend.name).unwrap_or(trend.momentum),
            rationale: trend.rationale.clone(),
            shift_from: None,
            shift_to: None,
        }
    }
}

/// Distinct structural shifts across the sequence
///
/// Shifts are keyed by title; the most recent report's version wins while the
/// order of first appearance is kept.
pub fn collect_shifts(reports: &[Report]) -> Vec<StructuralShift> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, StructuralShift> = HashMap::new();

    for shift in reports.iter().flat_map(|r| &r.structural_shifts) {
        if latest.insert(shift.title.clone(), shift.clone()).is_none() {
            order.push(shift.title.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|title| latest.remove(&title))
        .collect()
}

/// Trend dynamics for the sequence
///
/// Uses the structural shifts found in the reports; when there are none the
/// fallback catalog is used instead.
pub fn build_trend_dynamics(
    reports: &[Report],
    heatmap: &Heatmap,
    fallback: &[FallbackTrend],
    history: &[MomentumEntry],
) -> Vec<TrendDynamic> {
    let shifts = collect_shifts(reports);

    if shifts.is_empty() {
        tracing::debug!(count = fallback.len(), "No structural shifts, using fallback trends");
        return fallback
            .iter()
            .map(|t| TrendDynamic::from_fallback(t, history))
            .collect();
    }

    shifts
        .iter()
        .map(|shift| TrendDynamic::from_shift(shift, heatmap))
        .collect()
}

/// Trends split by momentum sign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendBoard {
    /// Accelerating and emerging, strongest momentum first
    pub rising: Vec<TrendDynamic>,
    /// Decelerating and freezing, most negative momentum first
    pub falling: Vec<TrendDynamic>,
}

impl TrendBoard {
    pub fn classify(trends: Vec<TrendDynamic>) -> Self {
        let (mut rising, mut falling): (Vec<_>, Vec<_>) =
            trends.into_iter().partition(|t| t.category.is_positive());

        rising.sort_by(|a, b| b.momentum.cmp(&a.momentum));
        falling.sort_by(|a, b| a.momentum.cmp(&b.momentum));

        Self { rising, falling }
    }

    pub fn is_empty(&self) -> bool {
        self.rising.is_empty() && self.falling.is_empty()
    }
}

/// One sparkline point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub momentum: f64,
}

/// Chronological momentum history of one named trend
pub fn momentum_history(entries: &[MomentumEntry], name: &str) -> Vec<HistoryPoint> {
    let mut points: Vec<HistoryPoint> = entries
        .iter()
        .filter_map(|entry| {
            entry
                .trends
                .iter()
                .find(|t| t.name == name)
                .map(|t| HistoryPoint {
                    date: entry.date,
                    momentum: t.momentum,
                })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Split-half momentum over a named history, when it has at least two points
pub fn momentum_from_history(entries: &[MomentumEntry], name: &str) -> Option<i64> {
    let values: Vec<f64> = momentum_history(entries, name)
        .into_iter()
        .map(|p| p.momentum)
        .collect();

    (values.len() >= 2).then(|| compute_momentum(&values))
}
