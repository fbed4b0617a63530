//! Persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep snapshot-cache and ROI-state storage behind repository traits
//!   so the analytics core stays testable without filesystem fixtures.
//!
//! # Invariants
//! - Repositories never hand out mutated snapshots; stored payloads are
//!   deserialized fresh per load.

pub mod roi_repo;
pub mod snapshot_repo;
