//! Aggregation, view and report benchmarks.
//!
//! Every derived value is recomputed from scratch; these measure that full recomputation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use student_performance::processing::{aggregate, view, ClassFilter, SortField, SortState, ViewQuery};
use student_performance::record::{Metric, RecordSet, StudentRecord};
use student_performance::report::{paginate, project, PageGeometry, ReportOptions};
use student_performance::types::CellValue;

fn generate_records(rows: usize) -> RecordSet {
    (0..rows)
        .map(|i| {
            let base = 40.0 + ((i * 7) % 60) as f64;
            StudentRecord {
                student_id: i.to_string(),
                name: format!("Student {i}"),
                class: format!("Class {}", i % 8),
                comprehension: CellValue::Number(base),
                attention: CellValue::Number((base + 5.0) % 100.0),
                focus: CellValue::Number((base + 11.0) % 100.0),
                retention: CellValue::Number((base + 3.0) % 100.0),
                assessment_score: CellValue::Number((base + 17.0) % 100.0),
                engagement_time: CellValue::Number(10.0 + (i % 50) as f64),
                extra: Default::default(),
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for rows in [100, 1_000, 5_000] {
        let records = generate_records(rows);
        group.bench_with_input(BenchmarkId::new("all_classes", rows), &records, |b, records| {
            b.iter(|| black_box(aggregate(records, &ClassFilter::All)))
        });
        let filter = ClassFilter::parse("Class 3");
        group.bench_with_input(BenchmarkId::new("one_class", rows), &records, |b, records| {
            b.iter(|| black_box(aggregate(records, &filter)))
        });
    }

    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    let records = generate_records(5_000);

    let by_score = ViewQuery {
        sort: SortState::default().toggle(SortField::Metric(Metric::AssessmentScore)),
        ..Default::default()
    };
    group.bench_function("sort_by_score_5000", |b| {
        b.iter(|| black_box(view(&records, &by_score)))
    });

    let search = ViewQuery {
        search: "Student 12".to_string(),
        ..Default::default()
    };
    group.bench_function("search_5000", |b| b.iter(|| black_box(view(&records, &search))));

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let records = generate_records(5_000);
    let snapshot = aggregate(&records, &ClassFilter::All);
    let options = ReportOptions::default();

    c.bench_function("project_and_paginate_5000", |b| {
        b.iter(|| {
            let report = project(&snapshot, &records, &ClassFilter::All, &options);
            black_box(paginate(&report, &PageGeometry::default()))
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_view, bench_report);
criterion_main!(benches);
