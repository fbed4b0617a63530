//! Core analytics and diffing engine for StatusPulse.
//! This crate is the single source of truth for dashboard derivations:
//! earned-value metrics, risk ranking, snapshot diffing, ROI estimation,
//! and the executive narrative.

pub mod analytics;
pub mod config;
pub mod db;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::diff::generate_changes;
pub use analytics::evm::calculate_metrics;
pub use analytics::narrative::{build_narrative, RagState};
pub use analytics::risk::{summarize_risks, SeverityPolicy};
pub use analytics::roi::{compute_roi, default_state as default_roi_state};
pub use config::Settings;
pub use ingest::notes::{parse_status_notes, NoteParseError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dashboard::{
    ChangeItem, ChangeKind, ChangesSummary, DashboardMeta, DashboardPayload, EntityKind,
    EvmMetrics, RiskLevel, RiskListItem, RiskMatrixPoint, RiskSummary, RoiAssumption,
    RoiModifiers, RoiPreset, RoiSnapshot, RoiState, UploadSummary,
};
pub use model::snapshot::{
    compute_dataset_hash, DatasetSnapshot, EvmBaselinePoint, Risk, StatusNote, Task, TaskStatus,
};
pub use repo::roi_repo::{RoiStateRepository, SqliteRoiStateRepository};
pub use repo::snapshot_repo::{
    SnapshotRepository, SqliteSnapshotRepository, StoreError, StoreResult,
};
pub use service::dashboard_service::{DashboardService, ServiceError};
pub use service::snapshot_service::SnapshotService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
