//! Derived value objects returned by the analytics engines.
//!
//! # Responsibility
//! - Define the plain structured outputs consumed by exports and the
//!   presentation layer (no framework-specific types).
//!
//! # Invariants
//! - Undefined numeric readings are `None`, never sentinel values.
//! - Wire names match the external schema (`"task"`, `"added"`, `"High"`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Core earned-value metrics for the current snapshot.
///
/// `spi`/`cpi` are `None` when their denominator is zero; `eac`/`etc`/`vac`
/// form a null-triple that is populated only when `cpi` is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmMetrics {
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
    pub sv: f64,
    pub cv: f64,
    pub spi: Option<f64>,
    pub cpi: Option<f64>,
    pub bac: f64,
    pub eac: Option<f64>,
    pub etc: Option<f64>,
    pub vac: Option<f64>,
    pub baseline_date: NaiveDate,
}

/// Qualitative severity band for a scored risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One scored, ranked risk in the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskListItem {
    pub id: String,
    pub summary: String,
    pub probability: f64,
    pub impact: u8,
    pub severity: f64,
    pub due_date: NaiveDate,
    pub owner: String,
    pub mitigation: Option<String>,
    pub status: RiskLevel,
    /// Days until due as of the scoring date; negative when overdue.
    pub days_to_due: i64,
}

/// One probability/impact point for the severity heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrixPoint {
    pub id: String,
    pub probability: f64,
    pub impact: u8,
    pub severity: f64,
    pub summary: String,
}

/// Ranked risk output: truncated display list, full heatmap, total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub top_risks: Vec<RiskListItem>,
    pub heatmap: Vec<RiskMatrixPoint>,
    pub watchlist_size: usize,
}

/// Entity collection a change item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Task,
    Risk,
    Note,
}

impl EntityKind {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Risk => "risk",
            Self::Note => "note",
        }
    }

    /// Capitalized label for narrative text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Risk => "Risk",
            Self::Note => "Note",
        }
    }
}

/// Kind of difference detected between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Removed => "removed",
        }
    }
}

/// A single detected change between the previous and current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub id: String,
    pub entity_type: EntityKind,
    pub change_type: ChangeKind,
    /// Last known title, even for removed entities.
    pub title: String,
    pub detail: String,
    /// Always the current snapshot's `last_updated`.
    pub timestamp: DateTime<Utc>,
}

/// Ordered change-set between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangesSummary {
    /// Sorted by timestamp descending.
    pub items: Vec<ChangeItem>,
    pub has_changes: bool,
}

/// One recurring PM activity the tool is assumed to shorten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAssumption {
    pub task_name: String,
    pub frequency_per_month: f64,
    pub hours_saved: f64,
    pub pm_hourly_cost: f64,
    pub team_size: u32,
}

/// Scaling knobs applied on top of the selected assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiModifiers {
    pub time_saved_multiplier: f64,
    pub frequency_multiplier: f64,
}

impl Default for RoiModifiers {
    fn default() -> Self {
        Self {
            time_saved_multiplier: 1.0,
            frequency_multiplier: 1.0,
        }
    }
}

/// A named bundle of default assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiPreset {
    pub name: String,
    pub label: String,
    pub description: String,
    pub assumptions: Vec<RoiAssumption>,
}

/// Computed ROI estimate plus the state it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiSnapshot {
    pub annual_savings: f64,
    pub monthly_savings: f64,
    pub total_hours_saved: f64,
    pub assumptions: Vec<RoiAssumption>,
    pub selected_preset: String,
    pub modifiers: RoiModifiers,
    pub available_presets: Vec<RoiPreset>,
}

/// Persisted ROI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiState {
    pub preset: String,
    pub modifiers: RoiModifiers,
    pub assumptions: Vec<RoiAssumption>,
}

/// Dashboard envelope metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMeta {
    pub dataset_hash: String,
    pub last_updated: DateTime<Utc>,
    pub safe_mode: bool,
}

/// The fully composed dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub evm: EvmMetrics,
    pub risks: RiskSummary,
    pub changes: ChangesSummary,
    pub roi: RoiSnapshot,
    pub narrative: String,
    pub meta: DashboardMeta,
}

/// Result of ingesting and saving a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub dataset_hash: String,
    pub task_count: usize,
    pub risk_count: usize,
    pub note_dates: Vec<NaiveDate>,
    pub baseline_points: usize,
    pub last_updated: DateTime<Utc>,
}
