//! Ingestion helpers that turn raw artifact bodies into model entities.
//!
//! Upload transport, CSV column handling, and request validation live in
//! the calling layer; this module only covers the structured parsing the
//! core owns.

pub mod notes;
