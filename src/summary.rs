//! Plain-text rendering of derived results for the CLI
//!
//! Headings are localized; values are printed as is.

use std::fmt::Write;

use crate::analytics::{Dashboard, Forecast, Heatmap, ProgramScore, ScoreReason, TrendBoard, WeekOverWeek};
use crate::catalog::LevelTaxonomy;
use crate::i18n::t;
use crate::models::WeakSignal;
use crate::utils::truncate_text;

fn heading(out: &mut String, text: &str) {
    let _ = writeln!(out, "\n== {text} ==");
}

fn not_enough_data(out: &mut String) {
    let _ = writeln!(out, "  {}", t!("summary.not_enough_data"));
}

/// Date x level table
pub fn heatmap_text(heatmap: &Heatmap, levels: &LevelTaxonomy) -> String {
    let mut out = String::new();
    if heatmap.is_empty() {
        not_enough_data(&mut out);
        return out;
    }

    let _ = write!(out, "{:<14}", "");
    for date in heatmap.dates() {
        let _ = write!(out, "{:>12}", date.to_string());
    }
    out.push('\n');

    for row in heatmap.rows() {
        let _ = write!(out, "{:<14}", levels.name(row.level));
        for value in &row.intensities {
            let _ = write!(out, "{value:>12}");
        }
        out.push('\n');
    }
    out
}

pub fn trends_text(board: &TrendBoard) -> String {
    let mut out = String::new();
    for (title, trends) in [
        (t!("summary.rising"), &board.rising),
        (t!("summary.falling"), &board.falling),
    ] {
        heading(&mut out, &title);
        if trends.is_empty() {
            not_enough_data(&mut out);
        }
        for trend in trends {
            let _ = writeln!(
                out,
                "  {:+5}%  {} [{}]",
                trend.momentum,
                trend.name,
                trend.category.as_str()
            );
        }
    }
    out
}

pub fn forecasts_text(forecasts: &[Forecast]) -> String {
    let mut out = String::new();
    if forecasts.is_empty() {
        not_enough_data(&mut out);
    }
    for f in forecasts {
        let arrow = match f.direction {
            crate::analytics::Direction::Up => "^",
            crate::analytics::Direction::Down => "v",
        };
        let _ = writeln!(out, "  {arrow} {:>3}%  {}", f.confidence, f.title);
        let _ = writeln!(out, "          {} ({})", f.description, f.based_on);
    }
    out
}

pub fn weekly_text(week: &WeekOverWeek) -> String {
    let mut out = String::new();
    let Some(cmp) = week.comparison() else {
        not_enough_data(&mut out);
        return out;
    };

    for metrics in [&cmp.previous, &cmp.current] {
        let top: Vec<String> = metrics
            .top_levels
            .iter()
            .map(|l| format!("L{}:{}", l.level, l.count))
            .collect();
        let _ = writeln!(
            out,
            "  W{:<3} events {:>5}  avg {:>4}  reports {:>3}  top {}",
            metrics.week_num,
            metrics.total_events,
            metrics.avg_events_per_day,
            metrics.report_count,
            top.join(", ")
        );
    }
    let _ = writeln!(
        out,
        "  events {:+}%  avg {:+}%  reports {:+}%",
        cmp.events_change, cmp.avg_change, cmp.report_count_change
    );
    out
}

pub fn programs_text(scores: &[ProgramScore]) -> String {
    let mut out = String::new();
    for score in scores {
        let detail: Vec<String> = score
            .reasons
            .iter()
            .map(|reason| match reason {
                ScoreReason::KeywordHits { hits } => format!("{hits} hits"),
                ScoreReason::ActiveLevels { levels } => format!("levels {levels:?}"),
            })
            .collect();
        let _ = writeln!(out, "  {:>3}  {}  ({})", score.score, score.key, detail.join(", "));
    }
    out
}

fn signals_text(signals: &[WeakSignal]) -> String {
    let mut out = String::new();
    if signals.is_empty() {
        not_enough_data(&mut out);
    }
    for signal in signals {
        let _ = writeln!(
            out,
            "  [{:?}] L{} {}",
            signal.urgency,
            signal.level,
            truncate_text(&signal.title, 72)
        );
    }
    out
}

/// Full dashboard summary
pub fn dashboard_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let mode = if dashboard.is_live {
        t!("summary.live")
    } else {
        t!("summary.archive_only")
    };
    let _ = writeln!(out, "{} ({mode})", t!("summary.title"));

    match dashboard.latest_date {
        Some(date) => {
            let _ = writeln!(
                out,
                "{}",
                t!("summary.reports", count = dashboard.report_count, date = date)
            );
        }
        None => not_enough_data(&mut out),
    }

    heading(&mut out, &t!("summary.level_activity"));
    for row in &dashboard.level_activity {
        let _ = writeln!(out, "  L{} {:<14} {:>6}", row.level, row.name, row.events);
    }

    out.push_str(&trends_text(&dashboard.trends));

    heading(&mut out, &t!("summary.forecasts"));
    out.push_str(&forecasts_text(&dashboard.forecasts));

    heading(&mut out, &t!("summary.week_over_week"));
    out.push_str(&weekly_text(&dashboard.week_over_week));

    heading(&mut out, &t!("summary.programs"));
    out.push_str(&programs_text(&dashboard.programs));

    heading(&mut out, &t!("summary.weak_signals"));
    out.push_str(&signals_text(&dashboard.weak_signals));

    out
}
