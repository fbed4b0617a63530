use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use statuspulse_core::db::open_db_in_memory;
use statuspulse_core::{
    ChangeKind, DashboardService, EntityKind, EvmBaselinePoint, Risk, RiskLevel, ServiceError,
    SnapshotService, SqliteRoiStateRepository, SqliteSnapshotRepository, Task, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

fn task(id: &str, title: &str, status: TaskStatus, planned: f64, actual: f64) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        owner: "Ana Gomez".to_string(),
        status,
        start_date: date(2024, 2, 19),
        finish_date: date(2024, 3, 29),
        planned_hours: planned,
        actual_hours: actual,
        blocked: false,
        dependency_ids: vec![],
    }
}

fn baseline() -> Vec<EvmBaselinePoint> {
    vec![EvmBaselinePoint {
        date: date(2024, 3, 8),
        pv: 150.0,
        ev: 120.0,
        ac: 120.0,
    }]
}

#[test]
fn dashboard_composes_all_engine_outputs() {
    let conn = open_db_in_memory().unwrap();
    let ingestion = SnapshotService::new(SqliteSnapshotRepository::new(&conn));

    ingestion
        .ingest(
            vec![task("T1", "Integrate autonomy stack", TaskStatus::InProgress, 120.0, 60.0)],
            vec![],
            vec![],
            baseline(),
            timestamp(2024, 3, 1),
        )
        .unwrap();

    let upload = ingestion
        .ingest(
            vec![
                task("T1", "Integrate autonomy stack", TaskStatus::Complete, 120.0, 120.0),
                task("T2", "Field testing prep", TaskStatus::NotStarted, 30.0, 0.0),
            ],
            vec![Risk {
                id: "R1".to_string(),
                summary: "Vendor firmware slips".to_string(),
                probability: 0.6,
                impact: 4,
                owner: "Marco Lee".to_string(),
                due_date: date(2024, 4, 1),
                mitigation: None,
            }],
            vec![],
            baseline(),
            timestamp(2024, 3, 8),
        )
        .unwrap();
    assert_eq!(upload.task_count, 2);
    assert_eq!(upload.risk_count, 1);

    let service = DashboardService::new(
        SqliteSnapshotRepository::new(&conn),
        SqliteRoiStateRepository::new(&conn),
    );
    let payload = service.build_dashboard(true).unwrap();

    // EVM: T1 complete (120) + T2 not started (0) against the 150h baseline.
    assert_eq!(payload.evm.ev, 120.0);
    assert_eq!(payload.evm.ac, 120.0);
    assert_eq!(payload.evm.pv, 150.0);
    assert_eq!(payload.evm.spi, Some(0.8));
    assert_eq!(payload.evm.cpi, Some(1.0));
    assert_eq!(payload.evm.bac, 150.0);
    assert_eq!(payload.evm.eac, Some(150.0));
    assert_eq!(payload.evm.etc, Some(30.0));

    // Diff against the rotated previous snapshot.
    let kinds: Vec<(EntityKind, ChangeKind, &str)> = payload
        .changes
        .items
        .iter()
        .map(|item| (item.entity_type, item.change_type, item.id.as_str()))
        .collect();
    assert!(kinds.contains(&(EntityKind::Task, ChangeKind::Updated, "T1")));
    assert!(kinds.contains(&(EntityKind::Task, ChangeKind::Added, "T2")));
    assert!(kinds.contains(&(EntityKind::Risk, ChangeKind::Added, "R1")));

    // Risk summary: severity 2.4 sits in the Medium band of the register
    // policy (High starts at 2.5).
    assert_eq!(payload.risks.watchlist_size, 1);
    assert_eq!(payload.risks.top_risks[0].id, "R1");
    assert_eq!(payload.risks.top_risks[0].severity, 2.4);
    assert_eq!(payload.risks.top_risks[0].status, RiskLevel::Medium);
    assert_eq!(payload.risks.top_risks[0].days_to_due, 24);

    // ROI defaults to the medium preset when no state was saved.
    assert_eq!(payload.roi.selected_preset, "medium");
    assert!(payload.roi.annual_savings > 0.0);

    // Narrative opens with the RAG classification implied by SPI 0.8.
    assert!(payload.narrative.starts_with("Status: At Risk. CPI 1 / SPI 0.8 (baseline 2024-03-08)."));
    assert!(payload.narrative.contains("Top risk: Vendor firmware slips"));
    assert!(payload.narrative.contains("Mitigation: Pending assignment."));

    // Meta mirrors the current snapshot.
    assert_eq!(payload.meta.dataset_hash, upload.dataset_hash);
    assert_eq!(payload.meta.last_updated, timestamp(2024, 3, 8));
    assert!(payload.meta.safe_mode);
}

#[test]
fn first_ingest_reports_initial_baselining() {
    let conn = open_db_in_memory().unwrap();
    let ingestion = SnapshotService::new(SqliteSnapshotRepository::new(&conn));
    ingestion
        .ingest(
            vec![task("T1", "Kickoff", TaskStatus::InProgress, 40.0, 10.0)],
            vec![],
            vec![],
            baseline(),
            timestamp(2024, 3, 1),
        )
        .unwrap();

    let service = DashboardService::new(
        SqliteSnapshotRepository::new(&conn),
        SqliteRoiStateRepository::new(&conn),
    );
    let payload = service.build_dashboard(false).unwrap();

    assert!(payload.changes.has_changes);
    assert_eq!(payload.changes.items.len(), 1);
    assert_eq!(payload.changes.items[0].id, "initial-load");
    assert!(payload
        .narrative
        .contains("Latest change: Note added - Initial dataset."));
    assert!(!payload.meta.safe_mode);
}

#[test]
fn empty_cache_yields_no_dataset_error() {
    let conn = open_db_in_memory().unwrap();
    let service = DashboardService::new(
        SqliteSnapshotRepository::new(&conn),
        SqliteRoiStateRepository::new(&conn),
    );

    let err = service.build_dashboard(true).unwrap_err();
    assert!(matches!(err, ServiceError::NoDataset));
}
