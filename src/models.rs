// Core data structures for stratum reports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Level identifier within the nine-level hierarchy (1 = Resources .. 9 = Capital)
pub type LevelId = u8;

/// Most concrete level
pub const MIN_LEVEL: LevelId = 1;

/// Most abstract level
pub const MAX_LEVEL: LevelId = 9;

/// Check whether a level id belongs to the fixed taxonomy
pub fn is_valid_level(level: LevelId) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

/// One dated intelligence report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Calendar date, unique across a report sequence
    pub date: NaiveDate,
    #[serde(default)]
    pub levels: Vec<LevelBucket>,
    #[serde(default)]
    pub structural_shifts: Vec<StructuralShift>,
    #[serde(default)]
    pub weak_signals: Vec<WeakSignal>,
    #[serde(default)]
    pub cross_level_links: Vec<CrossLevelLink>,
}

impl Report {
    /// Create an empty report for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            levels: Vec::new(),
            structural_shifts: Vec::new(),
            weak_signals: Vec::new(),
            cross_level_links: Vec::new(),
        }
    }

    /// Find the bucket for a level, if the report carries one
    pub fn bucket(&self, level: LevelId) -> Option<&LevelBucket> {
        self.levels.iter().find(|b| b.level == level)
    }

    /// Event count for a level, if present
    pub fn event_count(&self, level: LevelId) -> Option<u64> {
        self.bucket(level).map(|b| b.event_count)
    }

    /// Sum of all level event counts
    pub fn total_events(&self) -> u64 {
        self.levels.iter().map(|b| b.event_count).sum()
    }
}

/// Per-level slice of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBucket {
    pub level: LevelId,
    #[serde(default)]
    pub event_count: u64,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single reported event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Declared direction of a structural shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftTrend {
    Accelerating,
    Emerging,
    Decelerating,
    /// Unknown labels deserialize here as well
    #[serde(other)]
    Stable,
}

impl ShiftTrend {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accelerating => "accelerating",
            Self::Emerging => "emerging",
            Self::Decelerating => "decelerating",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for ShiftTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named FROM -> TO transition hypothesis tracked across reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralShift {
    pub title: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub mechanism: String,
    #[serde(default)]
    pub levels: Vec<LevelId>,
    pub trend: ShiftTrend,
    /// Number of reports mentioning this shift
    #[serde(default)]
    pub frequency: u32,
}

/// Momentum class of a derived trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendCategory {
    Accelerating,
    Emerging,
    Decelerating,
    Freezing,
}

impl TrendCategory {
    /// Accelerating and emerging trends carry positive momentum
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Accelerating | Self::Emerging)
    }

    /// Category for a declared shift direction; stalled shifts are freezing
    pub fn from_shift(trend: ShiftTrend) -> Self {
        match trend {
            ShiftTrend::Accelerating => Self::Accelerating,
            ShiftTrend::Emerging => Self::Emerging,
            ShiftTrend::Decelerating => Self::Decelerating,
            ShiftTrend::Stable => Self::Freezing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accelerating => "accelerating",
            Self::Emerging => "emerging",
            Self::Decelerating => "decelerating",
            Self::Freezing => "freezing",
        }
    }
}

/// Weak signal urgency; `High` orders before `Medium`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    #[serde(other)]
    Medium,
}

/// Early, low-confidence indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakSignal {
    pub level: LevelId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub urgency: Urgency,
}

/// Link between two levels noted in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossLevelLink {
    pub from_level: LevelId,
    pub to_level: LevelId,
    #[serde(default)]
    pub description: String,
}

/// Externally computed momentum of one named trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMomentum {
    pub name: String,
    pub momentum: f64,
}

/// One dated row of momentum history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub trends: Vec<NamedMomentum>,
}

/// What the loading collaborator hands to the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    #[serde(default)]
    pub archive_reports: Vec<Report>,
    #[serde(default)]
    pub live_report: Option<Report>,
    #[serde(default)]
    pub is_live: bool,
}

/// Immutable merged report sequence the derivations run over
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    /// Reports in ascending date order, dates unique
    pub reports: Vec<Report>,
    pub is_live: bool,
    #[serde(default)]
    pub momentum_history: Vec<MomentumEntry>,
}

impl ReportSnapshot {
    /// Merge a bundle into a snapshot
    pub fn from_bundle(bundle: ReportBundle) -> Self {
        Self {
            reports: crate::storage::merge_reports(bundle.archive_reports, bundle.live_report),
            is_live: bundle.is_live,
            momentum_history: Vec::new(),
        }
    }

    /// Attach momentum history, sorted by date
    #[must_use]
    pub fn with_momentum_history(mut self, mut history: Vec<MomentumEntry>) -> Self {
        history.sort_by_key(|e| e.date);
        self.momentum_history = history;
        self
    }

    /// Most recent report
    pub fn latest(&self) -> Option<&Report> {
        self.reports.last()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// SHA256 over the snapshot contents, used as a cache key
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update([u8::from(self.is_live)]);
        for report in &self.reports {
            if let Ok(bytes) = serde_json::to_vec(report) {
                hasher.update(&bytes);
            }
        }
        for entry in &self.momentum_history {
            if let Ok(bytes) = serde_json::to_vec(entry) {
                hasher.update(&bytes);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}
