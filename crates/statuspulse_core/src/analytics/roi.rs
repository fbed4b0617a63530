//! ROI estimation engine.
//!
//! # Responsibility
//! - Define the preset assumption library (low/medium/high complexity
//!   PMO) and compute savings estimates from (preset, modifiers,
//!   assumptions) state.
//!
//! # Invariants
//! - Computation is pure; persistence of ROI state lives in the repo
//!   layer.
//! - An unknown preset name falls back to the default preset's
//!   assumptions instead of failing.

use once_cell::sync::Lazy;

use super::round2;
use crate::model::dashboard::{RoiAssumption, RoiModifiers, RoiPreset, RoiSnapshot, RoiState};

/// Preset selected when no state has ever been saved.
pub const DEFAULT_PRESET: &str = "medium";

static PRESET_LIBRARY: Lazy<Vec<RoiPreset>> = Lazy::new(|| {
    vec![
        RoiPreset {
            name: "low".to_string(),
            label: "Low complexity PMO".to_string(),
            description:
                "Single tower delivery, monthly reporting cadence, minimal executive formatting."
                    .to_string(),
            assumptions: vec![
                assumption("Status assembly", 2.0, 2.5, 85.0, 1),
                assumption("Risk register grooming", 1.0, 1.5, 85.0, 1),
                assumption("Executive deck formatting", 0.5, 3.0, 95.0, 1),
            ],
        },
        RoiPreset {
            name: "medium".to_string(),
            label: "Medium complexity PMO".to_string(),
            description: "Three workstreams, weekly status cycles, standard exec read-out."
                .to_string(),
            assumptions: vec![
                assumption("Status assembly", 4.0, 4.0, 95.0, 1),
                assumption("Risk register grooming", 2.0, 2.5, 95.0, 1),
                assumption("Executive deck formatting", 1.0, 6.0, 105.0, 1),
                assumption("Stakeholder escalation prep", 1.0, 3.0, 105.0, 1),
            ],
        },
        RoiPreset {
            name: "high".to_string(),
            label: "High complexity PMO".to_string(),
            description:
                "Multi-region launch with weekly steering and heavy executive packaging."
                    .to_string(),
            assumptions: vec![
                assumption("Status assembly", 6.0, 5.0, 110.0, 2),
                assumption("Risk register grooming", 4.0, 3.5, 105.0, 2),
                assumption("Executive deck formatting", 2.0, 7.0, 120.0, 2),
                assumption("Steering committee analytics", 2.0, 4.0, 120.0, 2),
            ],
        },
    ]
});

fn assumption(
    task_name: &str,
    frequency_per_month: f64,
    hours_saved: f64,
    pm_hourly_cost: f64,
    team_size: u32,
) -> RoiAssumption {
    RoiAssumption {
        task_name: task_name.to_string(),
        frequency_per_month,
        hours_saved,
        pm_hourly_cost,
        team_size,
    }
}

/// Returns the full preset library.
pub fn available_presets() -> Vec<RoiPreset> {
    PRESET_LIBRARY.clone()
}

/// Returns the default assumptions for a preset name.
///
/// Unknown names fall back to [`DEFAULT_PRESET`].
pub fn preset_assumptions(preset: &str) -> Vec<RoiAssumption> {
    PRESET_LIBRARY
        .iter()
        .find(|entry| entry.name == preset)
        .or_else(|| PRESET_LIBRARY.iter().find(|entry| entry.name == DEFAULT_PRESET))
        .map(|entry| entry.assumptions.clone())
        .unwrap_or_default()
}

/// Initial ROI state used when nothing has been persisted yet.
pub fn default_state() -> RoiState {
    RoiState {
        preset: DEFAULT_PRESET.to_string(),
        modifiers: RoiModifiers::default(),
        assumptions: preset_assumptions(DEFAULT_PRESET),
    }
}

/// Calculates monthly and annual savings for the given ROI state.
///
/// Per assumption: hours saved scale by the time multiplier, occurrences
/// by the frequency multiplier and 12 months, and the whole by team size.
pub fn compute_roi(
    preset: &str,
    modifiers: &RoiModifiers,
    assumptions: &[RoiAssumption],
) -> RoiSnapshot {
    let mut total_annual = 0.0;
    let mut total_hours = 0.0;

    for assumption in assumptions {
        let adjusted_frequency = assumption.frequency_per_month * modifiers.frequency_multiplier;
        let adjusted_hours_saved = assumption.hours_saved * modifiers.time_saved_multiplier;
        let annual_occurrences = adjusted_frequency * 12.0;
        let hours_saved =
            adjusted_hours_saved * annual_occurrences * f64::from(assumption.team_size);
        total_hours += hours_saved;
        total_annual += hours_saved * assumption.pm_hourly_cost;
    }

    RoiSnapshot {
        annual_savings: round2(total_annual),
        monthly_savings: round2(total_annual / 12.0),
        total_hours_saved: round2(total_hours),
        assumptions: assumptions.to_vec(),
        selected_preset: preset.to_string(),
        modifiers: modifiers.clone(),
        available_presets: available_presets(),
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_roi, default_state, preset_assumptions, DEFAULT_PRESET};
    use crate::model::dashboard::{RoiAssumption, RoiModifiers};

    #[test]
    fn compute_roi_applies_modifiers() {
        let assumptions = vec![RoiAssumption {
            task_name: "Status assembly".to_string(),
            frequency_per_month: 2.0,
            hours_saved: 4.0,
            pm_hourly_cost: 100.0,
            team_size: 1,
        }];
        let modifiers = RoiModifiers {
            time_saved_multiplier: 1.2,
            frequency_multiplier: 1.1,
        };

        let snapshot = compute_roi("medium", &modifiers, &assumptions);

        let expected_hours: f64 = (4.0 * 1.2) * (2.0 * 1.1 * 12.0);
        assert_eq!(snapshot.total_hours_saved, (expected_hours * 100.0).round() / 100.0);
        assert_eq!(
            snapshot.annual_savings,
            (expected_hours * 100.0 * 100.0).round() / 100.0
        );
        assert_eq!(snapshot.monthly_savings, snapshot.annual_savings / 12.0);
        assert_eq!(snapshot.modifiers.time_saved_multiplier, 1.2);
        assert!(!snapshot.available_presets.is_empty());
    }

    #[test]
    fn unknown_preset_falls_back_to_default_assumptions() {
        assert_eq!(
            preset_assumptions("mystery"),
            preset_assumptions(DEFAULT_PRESET)
        );
    }

    #[test]
    fn default_state_uses_identity_modifiers() {
        let state = default_state();
        assert_eq!(state.preset, DEFAULT_PRESET);
        assert_eq!(state.modifiers.time_saved_multiplier, 1.0);
        assert_eq!(state.modifiers.frequency_multiplier, 1.0);
        assert_eq!(state.assumptions.len(), 4);
    }
}
