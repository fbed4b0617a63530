//! Risk severity scoring and ranking.
//!
//! # Responsibility
//! - Score risks (`severity = probability × impact`), band them, and rank
//!   the watchlist for display.
//!
//! # Invariants
//! - Ranking is a total order: severity descending, ties broken by
//!   ascending due date, stable on full ties.
//! - An empty register summarizes to empty outputs, not an error.

use chrono::NaiveDate;

use super::round2;
use crate::model::dashboard::{RiskLevel, RiskListItem, RiskMatrixPoint, RiskSummary};
use crate::model::snapshot::Risk;

/// How many ranked risks the display list keeps.
const TOP_RISK_COUNT: usize = 5;

/// Severity-to-band threshold mapping.
///
/// Two mappings coexist on purpose: the risk register path labels
/// conservatively, while live tracker ingestion surfaces records one band
/// earlier. They serve different call sites and must not be unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityPolicy {
    /// Register/dashboard banding: High >= 2.5, Medium >= 1.5.
    Standard,
    /// Live tracker ingestion banding: High >= 2.0, Medium >= 1.0.
    LiveIngest,
}

impl SeverityPolicy {
    /// Maps a severity score to its qualitative band under this policy.
    pub fn level(self, severity: f64) -> RiskLevel {
        let (high, medium) = match self {
            Self::Standard => (2.5, 1.5),
            Self::LiveIngest => (2.0, 1.0),
        };
        if severity >= high {
            RiskLevel::High
        } else if severity >= medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Severity score for one risk, rounded at computation time.
pub fn severity(probability: f64, impact: u8) -> f64 {
    round2(probability * f64::from(impact))
}

/// Scores and ranks the risk register as of the given date.
///
/// # Contract
/// - Banding uses [`SeverityPolicy::Standard`].
/// - `days_to_due` may be negative for overdue risks.
/// - `top_risks` is truncated to 5; `heatmap` covers every risk.
pub fn summarize_risks(risks: &[Risk], as_of: NaiveDate) -> RiskSummary {
    let mut items: Vec<RiskListItem> = risks
        .iter()
        .map(|risk| {
            let severity = severity(risk.probability, risk.impact);
            RiskListItem {
                id: risk.id.clone(),
                summary: risk.summary.clone(),
                probability: risk.probability,
                impact: risk.impact,
                severity,
                due_date: risk.due_date,
                owner: risk.owner.clone(),
                mitigation: risk.mitigation.clone(),
                status: SeverityPolicy::Standard.level(severity),
                days_to_due: (risk.due_date - as_of).num_days(),
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.severity
            .total_cmp(&a.severity)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });

    let heatmap = items
        .iter()
        .map(|item| RiskMatrixPoint {
            id: item.id.clone(),
            probability: item.probability,
            impact: item.impact,
            severity: item.severity,
            summary: item.summary.clone(),
        })
        .collect();

    let watchlist_size = items.len();
    items.truncate(TOP_RISK_COUNT);

    RiskSummary {
        top_risks: items,
        heatmap,
        watchlist_size,
    }
}

#[cfg(test)]
mod tests {
    use super::{severity, SeverityPolicy};
    use crate::model::dashboard::RiskLevel;

    #[test]
    fn severity_rounds_to_two_decimals() {
        assert_eq!(severity(0.55, 5), 2.75);
        assert_eq!(severity(0.333, 3), 1.0);
    }

    #[test]
    fn standard_policy_bands() {
        assert_eq!(SeverityPolicy::Standard.level(2.5), RiskLevel::High);
        assert_eq!(SeverityPolicy::Standard.level(2.4), RiskLevel::Medium);
        assert_eq!(SeverityPolicy::Standard.level(1.5), RiskLevel::Medium);
        assert_eq!(SeverityPolicy::Standard.level(1.49), RiskLevel::Low);
    }

    #[test]
    fn live_ingest_policy_surfaces_one_band_earlier() {
        assert_eq!(SeverityPolicy::LiveIngest.level(2.0), RiskLevel::High);
        assert_eq!(SeverityPolicy::LiveIngest.level(1.0), RiskLevel::Medium);
        assert_eq!(SeverityPolicy::LiveIngest.level(0.99), RiskLevel::Low);
    }
}
