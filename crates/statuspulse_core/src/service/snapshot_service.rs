//! Snapshot ingestion service.
//!
//! # Responsibility
//! - Assemble immutable snapshots from parsed parts, deriving the
//!   dataset hash, and save them with current→previous rotation.
//!
//! # Invariants
//! - Snapshots are superseded, never mutated; each ingest produces a new
//!   value and rotates the cache.

use chrono::{DateTime, Utc};
use log::info;

use super::dashboard_service::ServiceError;
use crate::model::dashboard::UploadSummary;
use crate::model::snapshot::{DatasetSnapshot, EvmBaselinePoint, Risk, StatusNote, Task};
use crate::repo::snapshot_repo::SnapshotRepository;

/// Use-case wrapper for snapshot ingestion and cache rotation.
pub struct SnapshotService<S> {
    snapshots: S,
}

impl<S: SnapshotRepository> SnapshotService<S> {
    pub fn new(snapshots: S) -> Self {
        Self { snapshots }
    }

    /// Assembles a snapshot from its parts and saves it as current.
    ///
    /// # Contract
    /// - The dataset hash is derived here; callers never supply it.
    /// - The prior current snapshot becomes the new previous one.
    pub fn ingest(
        &self,
        tasks: Vec<Task>,
        risks: Vec<Risk>,
        status_notes: Vec<StatusNote>,
        baseline: Vec<EvmBaselinePoint>,
        last_updated: DateTime<Utc>,
    ) -> Result<UploadSummary, ServiceError> {
        let snapshot =
            DatasetSnapshot::assemble(tasks, risks, status_notes, baseline, last_updated);
        self.snapshots.save_snapshot(&snapshot)?;

        info!(
            "event=snapshot_ingest module=service status=ok dataset_hash={} tasks={} risks={}",
            snapshot.dataset_hash,
            snapshot.tasks.len(),
            snapshot.risks.len()
        );

        Ok(UploadSummary {
            dataset_hash: snapshot.dataset_hash,
            task_count: snapshot.tasks.len(),
            risk_count: snapshot.risks.len(),
            note_dates: snapshot.status_notes.iter().map(|note| note.date).collect(),
            baseline_points: snapshot.baseline.len(),
            last_updated: snapshot.last_updated,
        })
    }

    /// Drops both cached snapshots.
    pub fn purge(&self) -> Result<(), ServiceError> {
        self.snapshots.purge()?;
        Ok(())
    }
}
