//! ROI state repository.
//!
//! # Responsibility
//! - Persist the selected preset, modifiers, and assumption overrides.
//!
//! # Invariants
//! - Missing state loads as the default (medium preset, identity
//!   modifiers) rather than an error.

use rusqlite::{params, Connection, OptionalExtension};

use super::snapshot_repo::StoreResult;
use crate::analytics::roi::default_state;
use crate::model::dashboard::RoiState;

/// Storage contract for ROI configuration.
pub trait RoiStateRepository {
    /// Loads the saved ROI state, falling back to the default.
    fn load_state(&self) -> StoreResult<RoiState>;
    /// Saves the ROI state, replacing any prior value.
    fn save_state(&self, state: &RoiState) -> StoreResult<()>;
}

/// SQLite-backed ROI state store (single row).
pub struct SqliteRoiStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoiStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoiStateRepository for SqliteRoiStateRepository<'_> {
    fn load_state(&self) -> StoreResult<RoiState> {
        let payload = self
            .conn
            .query_row("SELECT payload FROM roi_state WHERE id = 1", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        match payload {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(default_state()),
        }
    }

    fn save_state(&self, state: &RoiState) -> StoreResult<()> {
        let payload = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO roi_state (id, payload) VALUES (1, ?1)",
            params![payload],
        )?;
        Ok(())
    }
}
