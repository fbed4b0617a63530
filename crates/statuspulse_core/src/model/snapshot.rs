//! Snapshot entities and the canonical dataset hash.
//!
//! # Responsibility
//! - Define the task/risk/note/baseline records captured by one snapshot.
//! - Assemble immutable `DatasetSnapshot` values with a content hash.
//!
//! # Invariants
//! - A snapshot is never mutated after `assemble`; refreshes supersede it.
//! - Two snapshots with identical task/risk/note content hash identically,
//!   regardless of field ordering; baseline points and `last_updated` do
//!   not participate in the hash.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Task lifecycle state as reported by the upstream plan.
///
/// The four canonical labels are closed; anything else is carried verbatim
/// in `Other` so permissive call sites (EVM weighting) can degrade it to a
/// zero contribution without rejecting the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Complete,
    Blocked,
    /// Unrecognized status label, preserved exactly as ingested.
    Other(String),
}

impl TaskStatus {
    /// Returns the wire label for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Complete => "Complete",
            Self::Blocked => "Blocked",
            Self::Other(label) => label,
        }
    }

    /// Earned-value completion weight for this status.
    ///
    /// Unrecognized labels contribute nothing; validation belongs to the
    /// ingestion layer, not here.
    pub fn completion_weight(&self) -> f64 {
        match self {
            Self::NotStarted => 0.0,
            Self::InProgress => 0.5,
            Self::Complete => 1.0,
            Self::Blocked => 0.25,
            Self::Other(_) => 0.0,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Not Started" => Self::NotStarted,
            "In Progress" => Self::InProgress,
            "Complete" => Self::Complete,
            "Blocked" => Self::Blocked,
            _ => Self::Other(value),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        value.as_str().to_string()
    }
}

/// A single backlog item within one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within a snapshot; identity key for diffing.
    pub id: String,
    pub title: String,
    pub owner: String,
    pub status: TaskStatus,
    pub start_date: NaiveDate,
    /// Expected to be >= `start_date`; not enforced here.
    pub finish_date: NaiveDate,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub blocked: bool,
    /// Ids of prerequisite tasks. Order is not significant for comparison.
    pub dependency_ids: Vec<String>,
}

/// A risk register entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub summary: String,
    /// Probability of occurrence in `[0, 1]`.
    pub probability: f64,
    /// Impact rating in `1..=5`.
    pub impact: u8,
    pub owner: String,
    pub due_date: NaiveDate,
    pub mitigation: Option<String>,
}

/// Markdown status note keyed by calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNote {
    pub date: NaiveDate,
    pub author: Option<String>,
    pub content: String,
}

/// One planned/earned/actual-cost sample from the baseline series.
///
/// Only the most recent point (by date) is authoritative for current
/// metrics; older points are kept for trend rendering downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmBaselinePoint {
    pub date: NaiveDate,
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
}

/// One immutable, timestamped capture of the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub tasks: Vec<Task>,
    pub risks: Vec<Risk>,
    pub status_notes: Vec<StatusNote>,
    pub baseline: Vec<EvmBaselinePoint>,
    /// Content-derived hash; see [`compute_dataset_hash`].
    pub dataset_hash: String,
    pub last_updated: DateTime<Utc>,
}

impl DatasetSnapshot {
    /// Builds a snapshot from its parts, deriving the dataset hash.
    pub fn assemble(
        tasks: Vec<Task>,
        risks: Vec<Risk>,
        status_notes: Vec<StatusNote>,
        baseline: Vec<EvmBaselinePoint>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        let dataset_hash = compute_dataset_hash(&tasks, &risks, &status_notes);
        Self {
            tasks,
            risks,
            status_notes,
            baseline,
            dataset_hash,
            last_updated,
        }
    }
}

/// Computes the deterministic content hash of a dataset.
///
/// The projection is a JSON document with recursively sorted object keys,
/// so logically identical content hashes identically no matter how fields
/// or entries were ordered at ingestion time.
pub fn compute_dataset_hash(tasks: &[Task], risks: &[Risk], notes: &[StatusNote]) -> String {
    let payload = serde_json::json!({
        "tasks": tasks,
        "risks": risks,
        "notes": notes,
    });
    let digest = Sha256::digest(payload.to_string().as_bytes());
    hex::encode(digest)
}
