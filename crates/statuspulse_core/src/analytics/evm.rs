//! Earned Value Management calculations.
//!
//! # Responsibility
//! - Turn a task list plus a baseline series into the standard EVM
//!   metric set (PV/EV/AC, variances, indices, completion projections).
//!
//! # Invariants
//! - Pure and total over well-typed input; malformed statuses degrade to
//!   a zero completion weight instead of failing.
//! - Zero denominators yield undefined (`None`) indices, never errors.

use chrono::{NaiveDate, Utc};

use super::{round2, round3};
use crate::model::dashboard::EvmMetrics;
use crate::model::snapshot::{EvmBaselinePoint, Task};

/// Returns the most recent baseline point, if any.
fn latest_baseline(baseline: &[EvmBaselinePoint]) -> Option<&EvmBaselinePoint> {
    baseline.iter().max_by_key(|point| point.date)
}

/// Earned value: planned hours weighted by task completion.
fn weighted_ev(tasks: &[Task]) -> f64 {
    let total = tasks
        .iter()
        .map(|task| task.planned_hours * task.status.completion_weight())
        .sum();
    round2(total)
}

/// Actual cost: sum of recorded actual hours.
fn actual_cost(tasks: &[Task]) -> f64 {
    round2(tasks.iter().map(|task| task.actual_hours).sum())
}

/// Planned value and its baseline date.
///
/// Falls back to total planned hours as of today when no baseline points
/// exist. That is a degraded-but-defined reading, not an error.
fn planned_value(baseline: Option<&EvmBaselinePoint>, tasks: &[Task]) -> (f64, NaiveDate) {
    match baseline {
        Some(point) => (round2(point.pv), point.date),
        None => {
            let total_planned = round2(tasks.iter().map(|task| task.planned_hours).sum());
            (total_planned, Utc::now().date_naive())
        }
    }
}

/// Calculates the core EVM metric set for one snapshot.
///
/// # Contract
/// - `spi`/`cpi` are `None` when PV/AC is zero.
/// - `eac`/`etc`/`vac` are populated only when `cpi` is defined and
///   nonzero (a zero CPI would make the projection divide by zero), and
///   are derived from the already-rounded CPI so the published index and
///   the projection agree.
pub fn calculate_metrics(tasks: &[Task], baseline: &[EvmBaselinePoint]) -> EvmMetrics {
    let (pv, baseline_date) = planned_value(latest_baseline(baseline), tasks);
    let ev = weighted_ev(tasks);
    let ac = actual_cost(tasks);
    let sv = round2(ev - pv);
    let cv = round2(ev - ac);
    let spi = (pv != 0.0).then(|| round3(ev / pv));
    let cpi = (ac != 0.0).then(|| round3(ev / ac));
    let bac = round2(tasks.iter().map(|task| task.planned_hours).sum());

    let (eac, etc, vac) = match cpi.filter(|index| *index != 0.0) {
        Some(index) => {
            let eac = round2(ac + (bac - ev) / index);
            (Some(eac), Some(round2(eac - ac)), Some(round2(bac - eac)))
        }
        None => (None, None, None),
    };

    EvmMetrics {
        pv,
        ev,
        ac,
        sv,
        cv,
        spi,
        cpi,
        bac,
        eac,
        etc,
        vac,
        baseline_date,
    }
}
