//! Deterministic analytics engines.
//!
//! # Responsibility
//! - Derive earned-value metrics, risk rankings, change-sets, ROI
//!   estimates, and the narrative from immutable snapshot inputs.
//!
//! # Invariants
//! - Every engine is a pure function of its arguments: same inputs,
//!   bit-for-bit same outputs.
//! - Rounding happens once, at the point of computation; downstream
//!   consumers never re-round.

pub mod diff;
pub mod evm;
pub mod narrative;
pub mod risk;
pub mod roi;
pub mod textdiff;

/// Rounds to 2 decimal places (hours and currency-like outputs).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 3 decimal places (performance indices).
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
