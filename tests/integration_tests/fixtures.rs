//! Test fixtures for integration tests
//!
//! Provides sample report documents and helpers to lay out an archive

use std::path::Path;

/// Week 5 of 2024, two reports in one file
pub const WEEK_FIVE_REPORTS: &str = r#"[
    {
        "date": "2024-01-29",
        "levels": [
            {"level": 2, "eventCount": 3, "events": [
                {"title": "Grid operator delays interconnection", "description": "Data center load outpaces grid capacity"}
            ]},
            {"level": 6, "eventCount": 1, "events": [
                {"title": "Chip fab breaks ground", "description": "Semiconductor supply chain localizes"}
            ]}
        ]
    },
    {
        "date": "2024-01-30",
        "levels": [
            {"level": 4, "eventCount": 6, "events": [
                {"title": "Port congestion returns", "description": "Freight rates climb on supply chain stress"}
            ]}
        ]
    }
]"#;

/// Week 6 of 2024, one report per file
pub const WEEK_SIX_REPORTS: [(&str, &str); 3] = [
    (
        "2024-02-05.json",
        r#"{"date": "2024-02-05", "levels": [{"level": 2, "eventCount": 5}]}"#,
    ),
    (
        "2024-02-06.json",
        r#"{"date": "2024-02-06", "levels": [{"level": 6, "eventCount": 5}]}"#,
    ),
    (
        "2024-02-07.json",
        r#"{
            "date": "2024-02-07",
            "levels": [{"level": 8, "eventCount": 5}],
            "structuralShifts": [
                {"title": "Energy-compute coupling", "from": "separate grids", "to": "co-located generation",
                 "mechanism": "hyperscaler power purchase agreements", "levels": [2, 6],
                 "trend": "accelerating", "frequency": 4},
                {"title": "Bank intermediation", "from": "deposits", "to": "money market funds",
                 "mechanism": "rate differential", "levels": [8], "trend": "stable", "frequency": 2}
            ],
            "weakSignals": [
                {"level": 5, "title": "Retail margin squeeze", "urgency": "medium"},
                {"level": 8, "title": "Private credit redemptions", "urgency": "high"}
            ],
            "crossLevelLinks": [
                {"fromLevel": 2, "toLevel": 6},
                {"fromLevel": 6, "toLevel": 8},
                {"fromLevel": 8, "toLevel": 9}
            ]
        }"#,
    ),
];

/// Live report replacing the last archived day
pub const LIVE_REPORT: &str = r#"{
    "date": "2024-02-07",
    "levels": [{"level": 8, "eventCount": 9}]
}"#;

/// Momentum history rows for the sparkline of one trend
pub const MOMENTUM_HISTORY: &str = r#"[
    {"date": "2024-01-29", "trends": [{"name": "Energy-compute coupling", "momentum": 20.0}]},
    {"date": "2024-02-05", "trends": [{"name": "Energy-compute coupling", "momentum": 30.0}]}
]"#;

/// Write the two sample weeks into an archive directory
pub fn write_archive(dir: &Path) {
    std::fs::write(dir.join("2024-week05.json"), WEEK_FIVE_REPORTS).unwrap();
    for (name, body) in WEEK_SIX_REPORTS {
        std::fs::write(dir.join(name), body).unwrap();
    }
}
