//! Program relevance scoring
//!
//! Each catalog program is scored against the corpus text and the per-level
//! activity map. The worst case for any program is the flat baseline.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Program;
use crate::config::RelevanceConfig;
use crate::models::LevelId;
use crate::utils::normalize_whitespace;
use crate::utils::stats::rounded;

/// Why a program received its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoreReason {
    /// Raw keyword occurrences in the corpus
    KeywordHits { hits: usize },
    /// Program levels that saw activity
    ActiveLevels { levels: Vec<LevelId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramScore {
    pub key: String,
    /// 0-100
    pub score: u8,
    pub reasons: Vec<ScoreReason>,
}

/// Case-insensitive literal occurrences of all keywords
///
/// Keywords get the same whitespace collapsing as the corpus.
pub fn count_keyword_hits(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|k| normalize_whitespace(k.as_str()))
        .filter(|k| !k.is_empty())
        .filter_map(|keyword| {
            RegexBuilder::new(&regex::escape(&keyword))
                .case_insensitive(true)
                .build()
                .map_err(|e| tracing::warn!(keyword = %keyword, error = %e, "Skipping keyword"))
                .ok()
        })
        .map(|re| re.find_iter(text).count())
        .sum()
}

pub fn score_program(
    program: &Program,
    corpus: &str,
    activity: &BTreeMap<LevelId, u64>,
    config: &RelevanceConfig,
) -> ProgramScore {
    let hits = count_keyword_hits(corpus, &program.keywords);
    let keyword_score = (hits as f64 * config.keyword_weight).min(config.keyword_cap);

    let active_levels: Vec<LevelId> = program
        .levels
        .iter()
        .copied()
        .filter(|level| activity.get(level).is_some_and(|&count| count > 0))
        .collect();
    let level_activity: u64 = program
        .levels
        .iter()
        .filter_map(|level| activity.get(level))
        .sum();
    let level_score = (level_activity as f64 * config.activity_weight).min(config.activity_cap);

    let score = rounded(keyword_score + level_score + config.baseline).clamp(0, 100) as u8;

    ProgramScore {
        key: program.key.clone(),
        score,
        reasons: vec![
            ScoreReason::KeywordHits { hits },
            ScoreReason::ActiveLevels {
                levels: active_levels,
            },
        ],
    }
}

fn rank(mut scores: Vec<ProgramScore>) -> Vec<ProgramScore> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// Score every program, best first (ties keep catalog order)
pub fn score_programs(
    programs: &[Program],
    corpus: &str,
    activity: &BTreeMap<LevelId, u64>,
    config: &RelevanceConfig,
) -> Vec<ProgramScore> {
    rank(
        programs
            .iter()
            .map(|p| score_program(p, corpus, activity, config))
            .collect(),
    )
}

/// Score only the requested program keys; unknown keys are skipped
pub fn score_selected(
    programs: &[Program],
    keys: &[String],
    corpus: &str,
    activity: &BTreeMap<LevelId, u64>,
    config: &RelevanceConfig,
) -> Vec<ProgramScore> {
    let selected = keys
        .iter()
        .filter_map(|key| {
            let found = programs.iter().find(|p| &p.key == key);
            if found.is_none() {
                tracing::debug!(key = %key, "Unknown program key");
            }
            found
        })
        .map(|p| score_program(p, corpus, activity, config))
        .collect();
    rank(selected)
}
