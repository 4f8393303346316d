use student_performance::ingestion::{ingest_bytes, ingest_from_path, IngestionOptions, SourceFormat};
use student_performance::record::Metric;
use student_performance::types::CellValue;
use student_performance::DashboardError;

#[test]
fn ingest_from_path_infers_csv() {
    let records = ingest_from_path("tests/fixtures/students.csv", &IngestionOptions::default()).unwrap();

    assert_eq!(records.len(), 6);
    let first = &records.records()[0];
    assert_eq!(first.student_id, "1001");
    assert_eq!(first.class, "10A");
    assert_eq!(first.score(), 96.0);
    assert!(first.extra.is_empty());
}

#[test]
fn missing_columns_are_listed_in_order() {
    let err = ingest_from_path("tests/fixtures/missing_columns.csv", &IngestionOptions::default()).unwrap_err();

    match &err {
        DashboardError::Validation { missing } => {
            assert_eq!(missing, &vec!["retention".to_string(), "engagement_time".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "missing required columns: retention, engagement_time");
}

#[test]
fn header_only_file_is_rejected_as_empty() {
    let err = ingest_from_path("tests/fixtures/header_only.csv", &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, DashboardError::Parse { .. }));
    assert_eq!(err.to_string(), "parse error: empty file");
}

#[test]
fn empty_upload_is_rejected() {
    let err = ingest_bytes("empty.csv", b"", &IngestionOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "parse error: empty file");
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = ingest_bytes("notes.txt", b"a,b\n1,2\n", &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, DashboardError::UnsupportedFormat { .. }));
}

#[test]
fn explicit_format_overrides_the_extension() {
    let bytes = std::fs::read("tests/fixtures/students.csv").unwrap();
    let opts = IngestionOptions {
        format: Some(SourceFormat::Csv),
        ..Default::default()
    };
    let records = ingest_bytes("upload.bin", &bytes, &opts).unwrap();
    assert_eq!(records.len(), 6);
}

#[test]
fn blank_and_non_numeric_cells_read_as_zero_and_extras_are_kept() {
    let records = ingest_from_path("tests/fixtures/blank_cells.csv", &IngestionOptions::default()).unwrap();
    let ada = &records.records()[0];
    let ben = &records.records()[1];

    assert_eq!(ada.attention, CellValue::Empty);
    assert_eq!(ada.value(Metric::Attention), 0.0);
    assert_eq!(ben.value(Metric::Focus), 0.0);
    assert_eq!(ben.value(Metric::EngagementTime), 0.0);
    assert_eq!(ada.extra.get("homeroom"), Some(&CellValue::Text("Room 12".to_string())));
}
