//! Built-in reference data

use super::{FallbackTrend, LevelGroup, LevelInfo, LevelTaxonomy, Program, TallyEntry};
use crate::models::TrendCategory;

pub fn levels() -> LevelTaxonomy {
    let rows: [(u8, &str, &str, LevelGroup); 9] = [
        (1, "Resources", "#8d6e63", LevelGroup::Material),
        (2, "Energy", "#ff8f00", LevelGroup::Material),
        (3, "Production", "#f4511e", LevelGroup::Material),
        (4, "Logistics", "#43a047", LevelGroup::Exchange),
        (5, "Markets", "#00897b", LevelGroup::Exchange),
        (6, "Technology", "#1e88e5", LevelGroup::Exchange),
        (7, "Institutions", "#5e35b1", LevelGroup::Abstract),
        (8, "Finance", "#8e24aa", LevelGroup::Abstract),
        (9, "Capital", "#d81b60", LevelGroup::Abstract),
    ];

    LevelTaxonomy::new(
        rows.into_iter()
            .map(|(id, name, color, group)| LevelInfo {
                id,
                name: name.to_string(),
                color: color.to_string(),
                group,
            })
            .collect(),
    )
}

fn program(key: &str, name: &str, keywords: &[&str], levels: &[u8]) -> Program {
    Program {
        key: key.to_string(),
        name: name.to_string(),
        url: format!("https://programs.example.edu/{key}"),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        levels: levels.to_vec(),
    }
}

pub fn programs() -> Vec<Program> {
    vec![
        program(
            "supply-chain",
            "Supply Chain Management",
            &["supply chain", "logistics", "shipping", "freight", "inventory", "port"],
            &[1, 4],
        ),
        program(
            "energy-systems",
            "Energy Systems Engineering",
            &["energy", "grid", "solar", "battery", "hydrogen", "power plant"],
            &[1, 2],
        ),
        program(
            "advanced-manufacturing",
            "Advanced Manufacturing",
            &["manufacturing", "factory", "automation", "robot", "semiconductor"],
            &[3, 6],
        ),
        program(
            "data-science",
            "Applied Data Science",
            &["machine learning", "artificial intelligence", "data center", "algorithm", "cloud"],
            &[6, 7],
        ),
        program(
            "financial-technology",
            "Financial Technology",
            &["payment", "fintech", "stablecoin", "credit", "banking"],
            &[8, 9],
        ),
        program(
            "public-policy",
            "Economic Policy & Regulation",
            &["regulation", "tariff", "sanction", "subsidy", "legislation"],
            &[5, 7],
        ),
    ]
}

fn trend(
    id: &str,
    name: &str,
    levels: &[u8],
    category: TrendCategory,
    momentum: i64,
    rationale: &str,
) -> FallbackTrend {
    FallbackTrend {
        id: id.to_string(),
        name: name.to_string(),
        levels: levels.to_vec(),
        category,
        momentum,
        rationale: Some(rationale.to_string()),
    }
}

pub fn fallback_trends() -> Vec<FallbackTrend> {
    vec![
        trend(
            "energy-compute-coupling",
            "Energy-compute coupling",
            &[2, 6],
            TrendCategory::Accelerating,
            42,
            "Data center demand is pulling generation capacity into technology planning",
        ),
        trend(
            "private-credit-expansion",
            "Private credit expansion",
            &[8, 9],
            TrendCategory::Accelerating,
            35,
            "Non-bank lenders absorb risk that banks are shedding",
        ),
        trend(
            "nearshoring-production",
            "Nearshoring of production",
            &[3, 4],
            TrendCategory::Emerging,
            27,
            "Tariff exposure shortens supply routes",
        ),
        trend(
            "critical-minerals-security",
            "Critical minerals securitization",
            &[1, 7],
            TrendCategory::Emerging,
            18,
            "States treat raw material access as a security matter",
        ),
        trend(
            "platform-consolidation",
            "Platform market consolidation",
            &[5, 6],
            TrendCategory::Decelerating,
            -12,
            "Antitrust pressure slows acquisitions",
        ),
        trend(
            "just-in-time-logistics",
            "Globalized just-in-time logistics",
            &[4, 5],
            TrendCategory::Decelerating,
            -24,
            "Buffer inventories replace lean routing",
        ),
        trend(
            "fossil-upstream-investment",
            "Fossil upstream investment",
            &[1, 2],
            TrendCategory::Freezing,
            -38,
            "Capital expenditure on new exploration stalls",
        ),
        trend(
            "bank-intermediation",
            "Traditional bank intermediation",
            &[8],
            TrendCategory::Freezing,
            -19,
            "Deposits migrate to money market funds",
        ),
    ]
}

fn tally(rows: &[(&str, u64)]) -> Vec<TallyEntry> {
    rows.iter()
        .map(|(name, count)| TallyEntry {
            name: (*name).to_string(),
            count: *count,
        })
        .collect()
}

pub fn themes() -> Vec<TallyEntry> {
    tally(&[
        ("AI infrastructure", 14),
        ("Energy security", 11),
        ("Trade fragmentation", 9),
        ("Private markets", 7),
        ("Critical minerals", 6),
        ("Labor automation", 5),
    ])
}

pub fn companies() -> Vec<TallyEntry> {
    tally(&[
        ("NVIDIA", 9),
        ("TSMC", 8),
        ("BlackRock", 6),
        ("Maersk", 5),
        ("Siemens Energy", 4),
        ("Glencore", 3),
    ])
}
