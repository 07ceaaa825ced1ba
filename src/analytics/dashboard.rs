//! Every derivation over one snapshot, in one serializable structure

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::{corpus_text, level_activity, rank_tally, Heatmap};
use super::forecast::{forecast, Forecast};
use super::momentum::{build_trend_dynamics, momentum_history, HistoryPoint, TrendBoard};
use super::relevance::{score_programs, ProgramScore};
use super::weekly::{compare_weeks, WeekOverWeek};
use crate::catalog::{Catalog, TallyEntry};
use crate::config::EngineConfig;
use crate::models::{LevelId, ReportSnapshot, WeakSignal};

/// Cumulative activity of one level, with its display attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelActivityRow {
    pub level: LevelId,
    pub name: String,
    pub color: String,
    pub events: u64,
}

/// Momentum history of a named trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    pub name: String,
    pub points: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub latest_date: Option<NaiveDate>,
    pub is_live: bool,
    pub report_count: usize,
    pub heatmap: Heatmap,
    pub level_activity: Vec<LevelActivityRow>,
    pub trends: TrendBoard,
    pub sparklines: Vec<Sparkline>,
    pub forecasts: Vec<Forecast>,
    pub week_over_week: WeekOverWeek,
    pub programs: Vec<ProgramScore>,
    pub weak_signals: Vec<WeakSignal>,
    pub themes: Vec<TallyEntry>,
    pub companies: Vec<TallyEntry>,
}

impl Dashboard {
    /// Whether there is anything to show beyond reference data
    pub fn has_reports(&self) -> bool {
        self.report_count > 0
    }
}

/// Run every derivation over a snapshot
pub fn build_dashboard(snapshot: &ReportSnapshot, catalog: &Catalog, engine: &EngineConfig) -> Dashboard {
    let reports = &snapshot.reports;
    let heatmap = Heatmap::build(reports);
    let activity = level_activity(reports);

    let level_activity = catalog
        .levels
        .iter()
        .map(|info| LevelActivityRow {
            level: info.id,
            name: info.name.clone(),
            color: info.color.clone(),
            events: activity.get(&info.id).copied().unwrap_or(0),
        })
        .collect();

    let trends = TrendBoard::classify(build_trend_dynamics(
        reports,
        &heatmap,
        &catalog.fallback_trends,
        &snapshot.momentum_history,
    ));

    let sparklines = trends
        .rising
        .iter()
        .chain(&trends.falling)
        .map(|t| Sparkline {
            name: t.name.clone(),
            points: momentum_history(&snapshot.momentum_history, &t.name),
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    let mut weak_signals: Vec<WeakSignal> = snapshot
        .latest()
        .map(|r| r.weak_signals.clone())
        .unwrap_or_default();
    weak_signals.sort_by_key(|s| s.urgency);

    let corpus = corpus_text(reports);
    let top_n = engine.tallies.top_n;

    let dashboard = Dashboard {
        latest_date: snapshot.latest().map(|r| r.date),
        is_live: snapshot.is_live,
        report_count: reports.len(),
        level_activity,
        trends,
        sparklines,
        forecasts: forecast(reports, &catalog.levels, &engine.forecast),
        week_over_week: compare_weeks(reports),
        programs: score_programs(&catalog.programs, &corpus, &activity, &engine.relevance),
        weak_signals,
        themes: rank_tally(&catalog.themes, top_n),
        companies: rank_tally(&catalog.companies, top_n),
        heatmap,
    };

    tracing::debug!(
        reports = dashboard.report_count,
        forecasts = dashboard.forecasts.len(),
        rising = dashboard.trends.rising.len(),
        falling = dashboard.trends.falling.len(),
        "Built dashboard"
    );
    dashboard
}
