//! Snapshot diff engine.
//!
//! # Responsibility
//! - Compare two dataset snapshots and emit a structured change-set
//!   (added/updated/removed) across tasks, risks, and status notes.
//!
//! # Invariants
//! - Snapshots are never mutated; comparison works on borrowed data.
//! - Update detection uses explicit signature projections of the
//!   comparison-relevant fields only, never whole-record equality.
//! - Every emitted item carries the current snapshot's `last_updated`
//!   timestamp, and the final item order is an explicit sort by
//!   timestamp descending.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use super::textdiff::unified_diff;
use crate::model::dashboard::{ChangeItem, ChangeKind, ChangesSummary, EntityKind};
use crate::model::snapshot::{DatasetSnapshot, Risk, StatusNote, Task, TaskStatus};

/// Comparison projection of a task.
///
/// Dependency ids compare as a set; reordering them is not a change.
#[derive(Debug, PartialEq)]
struct TaskSignature<'a> {
    title: &'a str,
    owner: &'a str,
    status: &'a TaskStatus,
    start_date: NaiveDate,
    finish_date: NaiveDate,
    planned_hours: f64,
    actual_hours: f64,
    blocked: bool,
    dependency_ids: BTreeSet<&'a str>,
}

impl<'a> TaskSignature<'a> {
    fn of(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            owner: &task.owner,
            status: &task.status,
            start_date: task.start_date,
            finish_date: task.finish_date,
            planned_hours: task.planned_hours,
            actual_hours: task.actual_hours,
            blocked: task.blocked,
            dependency_ids: task.dependency_ids.iter().map(String::as_str).collect(),
        }
    }
}

/// Comparison projection of a risk.
#[derive(Debug, PartialEq)]
struct RiskSignature<'a> {
    summary: &'a str,
    probability: f64,
    impact: u8,
    owner: &'a str,
    due_date: NaiveDate,
    mitigation: Option<&'a str>,
}

impl<'a> RiskSignature<'a> {
    fn of(risk: &'a Risk) -> Self {
        Self {
            summary: &risk.summary,
            probability: risk.probability,
            impact: risk.impact,
            owner: &risk.owner,
            due_date: risk.due_date,
            mitigation: risk.mitigation.as_deref(),
        }
    }
}

/// Comparison projection of a status note (content compared trimmed).
#[derive(Debug, PartialEq)]
struct NoteSignature<'a> {
    author: Option<&'a str>,
    content: &'a str,
}

impl<'a> NoteSignature<'a> {
    fn of(note: &'a StatusNote) -> Self {
        Self {
            author: note.author.as_deref(),
            content: note.content.trim(),
        }
    }
}

/// Produces the comparison summary between two dataset snapshots.
///
/// # Contract
/// - `previous = None` (first-ever snapshot) emits exactly one synthetic
///   `(note, added)` item marking initial baselining.
/// - `has_changes` is true iff the item list is non-empty.
pub fn generate_changes(
    previous: Option<&DatasetSnapshot>,
    current: &DatasetSnapshot,
) -> ChangesSummary {
    let Some(previous) = previous else {
        return ChangesSummary {
            items: vec![ChangeItem {
                id: "initial-load".to_string(),
                entity_type: EntityKind::Note,
                change_type: ChangeKind::Added,
                title: "Initial dataset".to_string(),
                detail: "First dataset uploaded; baselining established.".to_string(),
                timestamp: current.last_updated,
            }],
            has_changes: true,
        };
    };

    let timestamp = current.last_updated;
    let mut items = Vec::new();

    compare_entities(
        &previous.tasks,
        &current.tasks,
        EntityKind::Task,
        |task| (&task.id, &task.title),
        TaskSignature::of,
        timestamp,
        &mut items,
    );
    compare_entities(
        &previous.risks,
        &current.risks,
        EntityKind::Risk,
        |risk| (&risk.id, &risk.summary),
        RiskSignature::of,
        timestamp,
        &mut items,
    );
    compare_notes(&previous.status_notes, &current.status_notes, timestamp, &mut items);

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let has_changes = !items.is_empty();
    ChangesSummary { items, has_changes }
}

/// Diffs one id-keyed entity collection.
///
/// Added/updated items are emitted in current-snapshot order, removals in
/// previous-snapshot order; removed items keep the last known title.
fn compare_entities<'a, T, S: PartialEq>(
    previous: &'a [T],
    current: &'a [T],
    entity_type: EntityKind,
    identity: impl Fn(&'a T) -> (&'a String, &'a String),
    signature: impl Fn(&'a T) -> S,
    timestamp: DateTime<Utc>,
    items: &mut Vec<ChangeItem>,
) {
    let previous_by_id: HashMap<&str, S> = previous
        .iter()
        .map(|entity| (identity(entity).0.as_str(), signature(entity)))
        .collect();
    let current_ids: BTreeSet<&str> = current
        .iter()
        .map(|entity| identity(entity).0.as_str())
        .collect();

    for entity in current {
        let (id, title) = identity(entity);
        match previous_by_id.get(id.as_str()) {
            None => items.push(ChangeItem {
                id: id.clone(),
                entity_type,
                change_type: ChangeKind::Added,
                title: title.clone(),
                detail: "New entry added.".to_string(),
                timestamp,
            }),
            Some(known) if *known != signature(entity) => items.push(ChangeItem {
                id: id.clone(),
                entity_type,
                change_type: ChangeKind::Updated,
                title: title.clone(),
                detail: "Updated fields detected.".to_string(),
                timestamp,
            }),
            Some(_) => {}
        }
    }

    for entity in previous {
        let (id, title) = identity(entity);
        if !current_ids.contains(id.as_str()) {
            items.push(ChangeItem {
                id: id.clone(),
                entity_type,
                change_type: ChangeKind::Removed,
                title: title.clone(),
                detail: "Entry removed from latest upload.".to_string(),
                timestamp,
            });
        }
    }
}

/// Diffs status notes, keyed by calendar date rather than a free-form id.
fn compare_notes(
    previous: &[StatusNote],
    current: &[StatusNote],
    timestamp: DateTime<Utc>,
    items: &mut Vec<ChangeItem>,
) {
    let previous_by_date: HashMap<NaiveDate, &StatusNote> =
        previous.iter().map(|note| (note.date, note)).collect();
    let current_by_date: HashMap<NaiveDate, &StatusNote> =
        current.iter().map(|note| (note.date, note)).collect();

    let all_dates: BTreeSet<NaiveDate> = previous_by_date
        .keys()
        .chain(current_by_date.keys())
        .copied()
        .collect();

    for date in all_dates {
        let title = format!("Status note {date}");
        match (
            previous_by_date.get(&date).copied(),
            current_by_date.get(&date).copied(),
        ) {
            (None, Some(_)) => items.push(ChangeItem {
                id: date.to_string(),
                entity_type: EntityKind::Note,
                change_type: ChangeKind::Added,
                title,
                detail: "New status note recorded.".to_string(),
                timestamp,
            }),
            (Some(before), Some(after)) if NoteSignature::of(before) != NoteSignature::of(after) => {
                items.push(ChangeItem {
                    id: date.to_string(),
                    entity_type: EntityKind::Note,
                    change_type: ChangeKind::Updated,
                    title,
                    detail: note_diff(before.content.trim(), after.content.trim()),
                    timestamp,
                });
            }
            (Some(_), None) => items.push(ChangeItem {
                id: date.to_string(),
                entity_type: EntityKind::Note,
                change_type: ChangeKind::Removed,
                title,
                detail: "Status note removed from latest upload.".to_string(),
                timestamp,
            }),
            _ => {}
        }
    }
}

/// Change detail for an updated note body.
fn note_diff(previous: &str, current: &str) -> String {
    if previous.is_empty() {
        return "New note added.".to_string();
    }
    let diff = unified_diff(previous, current);
    if diff.is_empty() {
        "No textual differences found.".to_string()
    } else {
        diff
    }
}
