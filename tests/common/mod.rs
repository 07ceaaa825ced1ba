//! Common test utilities

use chrono::NaiveDate;
use stratum::models::{
    CrossLevelLink, Event, LevelBucket, LevelId, Report, ShiftTrend, StructuralShift,
};

/// Parse an ISO date
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid ISO date")
}

/// Create a report with the given per-level event counts
pub fn create_report(day: &str, counts: &[(LevelId, u64)]) -> Report {
    let mut report = Report::new(date(day));
    for &(level, event_count) in counts {
        report.levels.push(LevelBucket {
            level,
            event_count,
            events: Vec::new(),
        });
    }
    report
}

/// Create a report whose level carries events with text
#[allow(dead_code)]
pub fn create_report_with_events(day: &str, level: LevelId, titles: &[&str]) -> Report {
    let mut report = Report::new(date(day));
    report.levels.push(LevelBucket {
        level,
        event_count: titles.len() as u64,
        events: titles
            .iter()
            .map(|title| Event {
                title: title.to_string(),
                description: String::new(),
            })
            .collect(),
    });
    report
}

/// Create a structural shift touching the given levels
#[allow(dead_code)]
pub fn create_shift(title: &str, levels: &[LevelId], trend: ShiftTrend) -> StructuralShift {
    StructuralShift {
        title: title.to_string(),
        from: "before".to_string(),
        to: "after".to_string(),
        mechanism: "test mechanism".to_string(),
        levels: levels.to_vec(),
        trend,
        frequency: 1,
    }
}

/// Create `n` cross-level links
#[allow(dead_code)]
pub fn create_links(n: usize) -> Vec<CrossLevelLink> {
    (0..n)
        .map(|i| CrossLevelLink {
            from_level: 1,
            to_level: 2 + (i % 8) as LevelId,
            description: format!("link {i}"),
        })
        .collect()
}
