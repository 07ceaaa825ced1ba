//! Derivations over a report snapshot
//!
//! All functions here are pure and synchronous. Empty or short inputs give
//! empty results, never errors.

pub mod aggregate;
pub mod dashboard;
pub mod forecast;
pub mod momentum;
pub mod relevance;
pub mod weekly;

pub use aggregate::{corpus_text, level_activity, rank_tally, Heatmap, HeatmapRow};
pub use dashboard::{build_dashboard, Dashboard, LevelActivityRow, Sparkline};
pub use forecast::{forecast, Direction, Forecast};
pub use momentum::{
    build_trend_dynamics, compute_momentum, generate_trend_data, momentum_from_history,
    momentum_history, HistoryPoint, TrendBoard, TrendDynamic, TrendPoint,
};
pub use relevance::{score_programs, score_selected, ProgramScore, ScoreReason};
pub use weekly::{compare_weeks, week_number, WeekComparison, WeekMetrics, WeekOverWeek};
