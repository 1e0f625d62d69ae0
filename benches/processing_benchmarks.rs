//! Performance benchmarks for the Absence Engine.
//!
//! Covers the pure processing paths (grid parsing, the record pipeline,
//! summaries) and one request through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

use absence_engine::api::{AppState, create_router};
use absence_engine::config::{ConfigLoader, FieldPlan, YearSource};
use absence_engine::models::RawRow;
use absence_engine::processing::{GridParser, process_records, summarize_events};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const STATUSES: [&str; 8] = ["Attended", "Sick", "Attended", "PTO", "", "No Show", "Attended", "Holiday"];

const MONTHS: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

/// Builds a year of month blocks with the given number of employees each.
fn create_grid(employees: usize) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    for month in MONTHS {
        rows.push(vec![json!(month)]);

        let mut header = vec![json!("")];
        header.extend((1..=28).map(|day| json!(day)));
        rows.push(header);

        for e in 0..employees {
            let mut row = vec![json!(format!("Employee {:03}", e))];
            row.extend((0..28).map(|d| json!(STATUSES[(d + e) % STATUSES.len()])));
            rows.push(row);
        }
        rows.push(vec![json!("")]);
    }
    rows
}

/// Builds leave rows where every third row repeats an earlier key.
fn create_leave_rows(count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            let key = if i % 3 == 2 { i - 1 } else { i };
            let day = (key % 28) + 1;
            RawRow(json!({
                "nameOfAbsentee": format!("Employee {:03}", key % 50),
                "startDate": format!("2024-02-{:02}", day),
                "endDate": format!("2024-02-{:02}", day),
                "noOfDays": 1,
                "noOfDaysNoWknd": 1,
                "reason": STATUSES[i % STATUSES.len()],
                "authorized": if i % 2 == 0 { "Yes" } else { "No" },
                "timeStamp": format!("2024-02-01T00:{:02}:00Z", i % 60),
            }))
        })
        .collect()
}

fn bench_grid_parse(c: &mut Criterion) {
    let parser = GridParser::default().with_year(YearSource::Fixed(2024));
    let mut group = c.benchmark_group("grid_parse");

    for employees in [10, 100] {
        let grid = create_grid(employees);
        group.throughput(Throughput::Elements(grid.len() as u64));
        group.bench_with_input(BenchmarkId::new("employees", employees), &grid, |b, grid| {
            b.iter(|| black_box(parser.parse_values(grid)))
        });
    }

    group.finish();
}

fn bench_record_pipeline(c: &mut Criterion) {
    let plan = FieldPlan::default();
    let synced_at = Utc::now();
    let mut group = c.benchmark_group("record_pipeline");

    for count in [100, 1000] {
        let rows = create_leave_rows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("rows", count), &rows, |b, rows| {
            b.iter(|| black_box(process_records(rows, &plan, synced_at)))
        });
    }

    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let events = GridParser::default()
        .with_year(YearSource::Fixed(2024))
        .parse_values(&create_grid(100));

    c.bench_function("summarize_events", |b| {
        b.iter(|| black_box(summarize_events(&events, 10)))
    });
}

fn bench_grid_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/csp").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = json!({ "rows": create_grid(10), "year": 2024 }).to_string();

    c.bench_function("grid_request", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/absences/grid")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_grid_parse,
    bench_record_pipeline,
    bench_summaries,
    bench_grid_request
);
criterion_main!(benches);
