//! Deterministic executive narrative builder.
//!
//! # Responsibility
//! - Compose the three-clause summary (overall state, top risk, latest
//!   change) from the structured engine outputs.
//!
//! # Invariants
//! - Template-based and pure: no randomness, no external calls.
//! - Clause wording is fixed; only the interpolated values vary.

use crate::model::dashboard::{ChangesSummary, EvmMetrics, RiskSummary};

/// Qualitative schedule/cost classification for the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RagState {
    OnTrack,
    Watch,
    AtRisk,
}

impl RagState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Watch => "Watch",
            Self::AtRisk => "At Risk",
        }
    }

    /// Classifies SPI/CPI into a RAG band.
    ///
    /// # Contract
    /// - Both indices >= 1.0: `OnTrack`.
    /// - Both >= 0.95, or either index undefined: `Watch`.
    /// - Otherwise: `AtRisk`.
    pub fn classify(spi: Option<f64>, cpi: Option<f64>) -> Self {
        let (Some(spi), Some(cpi)) = (spi, cpi) else {
            return Self::Watch;
        };
        if spi >= 1.0 && cpi >= 1.0 {
            Self::OnTrack
        } else if spi >= 0.95 && cpi >= 0.95 {
            Self::Watch
        } else {
            Self::AtRisk
        }
    }
}

/// An index reading for the headline. Undefined and zero readings both
/// render as `n/a`; a zero index is a degenerate value the headline must
/// not present as a real performance measurement.
fn index_display(value: Option<f64>) -> String {
    match value.filter(|index| *index != 0.0) {
        Some(index) => index.to_string(),
        None => "n/a".to_string(),
    }
}

/// Composes the exec-ready narrative from the three engine outputs.
pub fn build_narrative(
    evm: &EvmMetrics,
    risks: &RiskSummary,
    changes: &ChangesSummary,
) -> String {
    let rag = RagState::classify(evm.spi, evm.cpi);
    let mut clauses = Vec::with_capacity(3);

    clauses.push(format!(
        "Status: {}. CPI {} / SPI {} (baseline {}).",
        rag.as_str(),
        index_display(evm.cpi),
        index_display(evm.spi),
        evm.baseline_date
    ));

    match risks.top_risks.first() {
        Some(top) => clauses.push(format!(
            "Top risk: {} (severity {}, due {}). Mitigation: {}",
            top.summary,
            top.severity,
            top.due_date,
            top.mitigation.as_deref().unwrap_or("Pending assignment.")
        )),
        None => clauses.push("No active risks logged in the register.".to_string()),
    }

    match changes.items.first().filter(|_| changes.has_changes) {
        Some(latest) => clauses.push(format!(
            "Latest change: {} {} - {}.",
            latest.entity_type.label(),
            latest.change_type.as_str(),
            latest.title
        )),
        None => clauses.push("No changes detected since previous snapshot.".to_string()),
    }

    clauses.join(" ")
}

#[cfg(test)]
mod tests {
    use super::{index_display, RagState};

    #[test]
    fn classify_requires_both_indices_at_one_for_on_track() {
        assert_eq!(RagState::classify(Some(1.0), Some(1.0)), RagState::OnTrack);
        assert_eq!(RagState::classify(Some(0.99), Some(1.2)), RagState::Watch);
        assert_eq!(RagState::classify(Some(0.95), Some(0.95)), RagState::Watch);
        assert_eq!(RagState::classify(Some(0.94), Some(1.1)), RagState::AtRisk);
    }

    #[test]
    fn classify_treats_undefined_indices_as_watch() {
        assert_eq!(RagState::classify(None, Some(1.5)), RagState::Watch);
        assert_eq!(RagState::classify(Some(0.2), None), RagState::Watch);
        assert_eq!(RagState::classify(None, None), RagState::Watch);
    }

    #[test]
    fn undefined_and_zero_indices_render_as_na() {
        assert_eq!(index_display(None), "n/a");
        assert_eq!(index_display(Some(0.0)), "n/a");
        assert_eq!(index_display(Some(0.871)), "0.871");
    }
}
