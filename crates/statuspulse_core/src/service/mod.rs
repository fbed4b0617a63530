//! Use-case services orchestrating engines and repositories.
//!
//! # Responsibility
//! - Sequence the analytics engines into the dashboard payload.
//! - Assemble and rotate snapshots on ingestion.
//!
//! # Invariants
//! - Services add no business logic of their own beyond sequencing and
//!   field assembly; all derivations live in `analytics`.

pub mod dashboard_service;
pub mod snapshot_service;
