//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `statuspulse_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("statuspulse_core ping={}", statuspulse_core::ping());
    println!("statuspulse_core version={}", statuspulse_core::core_version());
}
