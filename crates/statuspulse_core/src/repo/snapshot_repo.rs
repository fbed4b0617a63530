//! Snapshot cache repository.
//!
//! # Responsibility
//! - Persist the current/previous snapshot pair behind a stable trait.
//! - Rotate `current` into `previous` atomically on every save.
//!
//! # Invariants
//! - At most one snapshot per slot; a save never leaves the pair torn.
//! - Writers are serialized by the calling layer; this repository only
//!   guarantees per-save atomicity.

use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::db::DbError;
use crate::model::snapshot::DatasetSnapshot;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for cache repositories.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A stored payload no longer deserializes into the current model.
    Payload(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "invalid stored payload: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Storage contract for the current/previous snapshot pair.
pub trait SnapshotRepository {
    /// Saves `snapshot` as current, rotating the old current to previous.
    fn save_snapshot(&self, snapshot: &DatasetSnapshot) -> StoreResult<()>;
    /// Loads the latest saved snapshot, if any.
    fn load_current(&self) -> StoreResult<Option<DatasetSnapshot>>;
    /// Loads the snapshot that was current before the last save, if any.
    fn load_previous(&self) -> StoreResult<Option<DatasetSnapshot>>;
    /// Deletes both cached snapshots.
    fn purge(&self) -> StoreResult<()>;
}

/// SQLite-backed snapshot cache.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_slot(&self, slot: &str) -> StoreResult<Option<DatasetSnapshot>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE slot = ?1",
                params![slot],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save_snapshot(&self, snapshot: &DatasetSnapshot) -> StoreResult<()> {
        let payload = serde_json::to_string(snapshot)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM snapshots WHERE slot = 'previous'", [])?;
        tx.execute(
            "UPDATE snapshots SET slot = 'previous' WHERE slot = 'current'",
            [],
        )?;
        tx.execute(
            "INSERT INTO snapshots (slot, payload, saved_at) VALUES ('current', ?1, ?2)",
            params![payload, snapshot.last_updated.to_rfc3339()],
        )?;
        tx.commit()?;

        info!(
            "event=snapshot_save module=repo status=ok dataset_hash={} tasks={} risks={} notes={}",
            snapshot.dataset_hash,
            snapshot.tasks.len(),
            snapshot.risks.len(),
            snapshot.status_notes.len()
        );
        Ok(())
    }

    fn load_current(&self) -> StoreResult<Option<DatasetSnapshot>> {
        self.load_slot("current")
    }

    fn load_previous(&self) -> StoreResult<Option<DatasetSnapshot>> {
        self.load_slot("previous")
    }

    fn purge(&self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM snapshots", [])?;
        info!("event=snapshot_purge module=repo status=ok");
        Ok(())
    }
}
