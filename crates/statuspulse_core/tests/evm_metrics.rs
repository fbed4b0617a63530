use chrono::{NaiveDate, Utc};
use statuspulse_core::{calculate_metrics, EvmBaselinePoint, Task, TaskStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(
    id: &str,
    title: &str,
    owner: &str,
    status: TaskStatus,
    planned_hours: f64,
    actual_hours: f64,
    blocked: bool,
    dependency_ids: &[&str],
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        owner: owner.to_string(),
        status,
        start_date: date(2023, 9, 1),
        finish_date: date(2023, 10, 10),
        planned_hours,
        actual_hours,
        blocked,
        dependency_ids: dependency_ids.iter().map(|dep| dep.to_string()).collect(),
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        task("T101", "Integrate autonomy stack", "Ana Gomez", TaskStatus::InProgress, 120.0, 110.0, false, &[]),
        task("T102", "Field testing prep", "Marco Lee", TaskStatus::Complete, 80.0, 78.0, false, &["T101"]),
        task("T103", "Vendor alignment", "Sophia Patel", TaskStatus::InProgress, 60.0, 35.0, true, &["T101"]),
        task("T104", "Telecom compliance forms", "Jerry Wu", TaskStatus::NotStarted, 55.0, 0.0, false, &[]),
        task("T105", "Sprint 18 demo", "Leah Chen", TaskStatus::Complete, 40.0, 45.0, false, &["T102"]),
        task("T106", "Operations handoff deck", "Olivia Park", TaskStatus::InProgress, 70.0, 20.0, false, &["T102"]),
        task("T107", "Latency optimization", "Kai Nair", TaskStatus::Complete, 65.0, 68.0, false, &["T101"]),
    ]
}

#[test]
fn calculate_metrics_matches_expected() {
    let tasks = sample_tasks();
    let baseline = vec![EvmBaselinePoint {
        date: date(2023, 9, 27),
        pv: 380.0,
        ev: 325.0,
        ac: 345.0,
    }];

    let metrics = calculate_metrics(&tasks, &baseline);
    assert_eq!(metrics.pv, 380.0);
    assert_eq!(metrics.ev, 310.0);
    assert_eq!(metrics.ac, 356.0);
    assert_eq!(metrics.sv, -70.0);
    assert_eq!(metrics.cv, -46.0);
    assert_eq!(metrics.spi, Some(0.816));
    assert_eq!(metrics.cpi, Some(0.871));
    assert_eq!(metrics.bac, 490.0);
    assert_eq!(metrics.eac, Some(562.66));
    assert_eq!(metrics.etc, Some(206.66));
    assert_eq!(metrics.vac, Some(-72.66));
    assert_eq!(metrics.baseline_date, date(2023, 9, 27));
}

#[test]
fn latest_baseline_point_wins() {
    let tasks = sample_tasks();
    let baseline = vec![
        EvmBaselinePoint { date: date(2023, 9, 27), pv: 380.0, ev: 325.0, ac: 345.0 },
        EvmBaselinePoint { date: date(2023, 9, 13), pv: 250.0, ev: 200.0, ac: 210.0 },
    ];

    let metrics = calculate_metrics(&tasks, &baseline);
    assert_eq!(metrics.pv, 380.0);
    assert_eq!(metrics.baseline_date, date(2023, 9, 27));
}

#[test]
fn missing_baseline_falls_back_to_planned_hours_as_of_today() {
    let tasks = vec![
        task("T1", "Alpha", "Ana", TaskStatus::InProgress, 120.0, 60.0, false, &[]),
        task("T2", "Beta", "Ben", TaskStatus::NotStarted, 80.0, 0.0, false, &[]),
    ];

    let metrics = calculate_metrics(&tasks, &[]);
    assert_eq!(metrics.pv, 200.0);
    assert_eq!(metrics.baseline_date, Utc::now().date_naive());
}

#[test]
fn completion_weights_anchor_ev_contributions() {
    let complete = vec![task("T1", "Done", "Ana", TaskStatus::Complete, 73.5, 70.0, false, &[])];
    assert_eq!(calculate_metrics(&complete, &[]).ev, 73.5);

    let untouched = vec![task("T1", "Todo", "Ana", TaskStatus::NotStarted, 73.5, 0.0, false, &[])];
    assert_eq!(calculate_metrics(&untouched, &[]).ev, 0.0);

    let unknown = vec![task(
        "T1",
        "Odd",
        "Ana",
        TaskStatus::Other("Deferred".to_string()),
        73.5,
        0.0,
        false,
        &[],
    )];
    assert_eq!(calculate_metrics(&unknown, &[]).ev, 0.0);
}

#[test]
fn zero_actual_cost_leaves_indices_undefined() {
    let tasks = vec![task("T1", "Alpha", "Ana", TaskStatus::InProgress, 40.0, 0.0, false, &[])];
    let baseline = vec![EvmBaselinePoint { date: date(2023, 9, 27), pv: 40.0, ev: 20.0, ac: 0.0 }];

    let metrics = calculate_metrics(&tasks, &baseline);
    assert_eq!(metrics.cpi, None);
    assert_eq!(metrics.eac, None);
    assert_eq!(metrics.etc, None);
    assert_eq!(metrics.vac, None);
    assert_eq!(metrics.spi, Some(0.5));
}

#[test]
fn on_budget_completion_projects_zero_remaining() {
    let tasks = vec![task("T1", "Alpha", "Ana", TaskStatus::Complete, 50.0, 50.0, false, &[])];
    let baseline = vec![EvmBaselinePoint { date: date(2023, 9, 27), pv: 50.0, ev: 50.0, ac: 50.0 }];

    let metrics = calculate_metrics(&tasks, &baseline);
    assert_eq!(metrics.cpi, Some(1.0));
    assert_eq!(metrics.eac, Some(50.0));
    assert_eq!(metrics.etc, Some(0.0));
    assert_eq!(metrics.vac, Some(0.0));
}

#[test]
fn calculate_metrics_is_idempotent() {
    let tasks = sample_tasks();
    let baseline = vec![EvmBaselinePoint {
        date: date(2023, 9, 27),
        pv: 380.0,
        ev: 325.0,
        ac: 345.0,
    }];

    let first = calculate_metrics(&tasks, &baseline);
    let second = calculate_metrics(&tasks, &baseline);
    assert_eq!(first, second);
}
