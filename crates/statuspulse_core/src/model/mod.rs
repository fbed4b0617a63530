//! Domain model for dataset snapshots and dashboard payloads.
//!
//! # Responsibility
//! - Define the canonical entities captured by a dataset snapshot.
//! - Define the derived value objects the analytics engines return.
//!
//! # Invariants
//! - Snapshots are immutable once assembled; refreshes build new values.
//! - `dataset_hash` is a pure function of tasks, risks, and status notes.

pub mod dashboard;
pub mod snapshot;
