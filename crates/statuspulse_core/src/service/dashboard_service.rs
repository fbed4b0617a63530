//! Dashboard aggregation service.
//!
//! # Responsibility
//! - Compose EVM, risk, diff, ROI, and narrative outputs into one
//!   payload for exports and the presentation layer.
//!
//! # Invariants
//! - Pure sequencing: every number in the payload comes from an engine
//!   or the snapshot itself.
//! - The previous snapshot is consumed read-only; rotation happens only
//!   in the ingestion path.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

use crate::analytics::diff::generate_changes;
use crate::analytics::evm::calculate_metrics;
use crate::analytics::narrative::build_narrative;
use crate::analytics::risk::summarize_risks;
use crate::analytics::roi::compute_roi;
use crate::model::dashboard::{DashboardMeta, DashboardPayload};
use crate::model::snapshot::DatasetSnapshot;
use crate::repo::roi_repo::RoiStateRepository;
use crate::repo::snapshot_repo::{SnapshotRepository, StoreError};

/// Service error for dashboard composition.
#[derive(Debug)]
pub enum ServiceError {
    /// No dataset has been ingested yet.
    NoDataset,
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataset => write!(f, "no dataset ingested yet"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoDataset => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Aggregates the analytics engines over the cached snapshot pair.
pub struct DashboardService<S, R> {
    snapshots: S,
    roi: R,
}

impl<S, R> DashboardService<S, R>
where
    S: SnapshotRepository,
    R: RoiStateRepository,
{
    pub fn new(snapshots: S, roi: R) -> Self {
        Self { snapshots, roi }
    }

    /// Builds the dashboard payload for the cached current snapshot.
    ///
    /// # Errors
    /// - [`ServiceError::NoDataset`] when nothing has been ingested.
    pub fn build_dashboard(&self, safe_mode: bool) -> Result<DashboardPayload, ServiceError> {
        let snapshot = self
            .snapshots
            .load_current()?
            .ok_or(ServiceError::NoDataset)?;
        self.compose(&snapshot, safe_mode)
    }

    /// Builds the dashboard payload for an explicit current snapshot,
    /// still diffing against the cached previous one.
    pub fn compose(
        &self,
        snapshot: &DatasetSnapshot,
        safe_mode: bool,
    ) -> Result<DashboardPayload, ServiceError> {
        let started_at = Instant::now();

        let previous = self.snapshots.load_previous()?;
        let changes = generate_changes(previous.as_ref(), snapshot);
        let evm = calculate_metrics(&snapshot.tasks, &snapshot.baseline);
        let risks = summarize_risks(&snapshot.risks, snapshot.last_updated.date_naive());
        let roi_state = self.roi.load_state()?;
        let roi = compute_roi(&roi_state.preset, &roi_state.modifiers, &roi_state.assumptions);
        let narrative = build_narrative(&evm, &risks, &changes);

        info!(
            "event=dashboard_build module=service status=ok dataset_hash={} changes={} watchlist={} duration_ms={}",
            snapshot.dataset_hash,
            changes.items.len(),
            risks.watchlist_size,
            started_at.elapsed().as_millis()
        );

        Ok(DashboardPayload {
            evm,
            risks,
            changes,
            roi,
            narrative,
            meta: DashboardMeta {
                dataset_hash: snapshot.dataset_hash.clone(),
                last_updated: snapshot.last_updated,
                safe_mode,
            },
        })
    }
}
