use std::sync::{Arc, Mutex};

use student_performance::ingestion::{
    ingest_bytes, ingest_from_path, CompositeObserver, IngestionContext, IngestionObserver,
    IngestionOptions, IngestionSeverity, IngestionStats, SourceFormat,
};
use student_performance::DashboardError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
    sources: Mutex<Vec<(String, Option<SourceFormat>)>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.sources.lock().unwrap().push((ctx.source.clone(), ctx.format));
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, _error: &DashboardError) {
        self.sources.lock().unwrap().push((ctx.source.clone(), ctx.format));
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &DashboardError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>, threshold: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: threshold,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.csv", &options(&obs, IngestionSeverity::Critical))
        .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(
        obs.sources.lock().unwrap().clone(),
        vec![("tests/fixtures/does_not_exist.csv".to_string(), Some(SourceFormat::Csv))]
    );
}

#[test]
fn observer_receives_failure_without_alert_for_validation_error() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = ingest_from_path("tests/fixtures/missing_columns.csv", &options(&obs, IngestionSeverity::Critical))
        .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_validation_error() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = ingest_bytes("empty.csv", b"", &options(&obs, IngestionSeverity::Error)).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn unknown_format_is_reported_without_a_format() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = ingest_bytes("notes.txt", b"x", &options(&obs, IngestionSeverity::Critical)).unwrap_err();

    assert_eq!(obs.sources.lock().unwrap().clone(), vec![("notes.txt".to_string(), None)]);
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());

    let records = ingest_from_path("tests/fixtures/blank_cells.csv", &options(&obs, IngestionSeverity::Critical))
        .unwrap();

    assert_eq!(records.len(), 2);
    // attention on row 1, engagement_time on row 2; "abc" is not blank
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![IngestionStats {
            records: 2,
            blank_numeric_cells: 2,
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn composite_forwards_every_outcome_to_each_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![first.clone() as Arc<dyn IngestionObserver>, second.clone()]);
    let opts = IngestionOptions {
        observer: Some(Arc::new(composite)),
        alert_at_or_above: IngestionSeverity::Error,
        ..Default::default()
    };

    ingest_from_path("tests/fixtures/students.csv", &opts).unwrap();
    let _ = ingest_bytes("empty.csv", b"", &opts).unwrap_err();

    for obs in [&first, &second] {
        assert_eq!(obs.successes.lock().unwrap().len(), 1);
        assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    }
}
