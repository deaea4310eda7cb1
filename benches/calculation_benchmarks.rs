//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure engine, work-log aggregation, and the HTTP path:
//! - Single payroll calculation
//! - Aggregating a 31-day work log
//! - `/calculate` with a full month of entries
//! - Batch of 1000 payrolls
//! - Scaling with the number of daily entries
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use estate_payroll::api::{AppState, create_router};
use estate_payroll::calculation::{aggregate_work_log, calculate_payroll};
use estate_payroll::config::ConfigLoader;
use estate_payroll::models::{DailyEntry, Employee, PayrollInput, WorkLog};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn create_employee(i: usize) -> Employee {
    Employee {
        id: format!("emp_bench_{:04}", i),
        name: format!("Bench {}", i),
        children_count: (i % 4) as u32,
        entry_time: if i % 5 == 0 { "08:40" } else { "08:00" }.to_string(),
    }
}

/// A work log with `days` entries, every third one an overnight shift.
fn create_work_log(days: u8) -> WorkLog {
    let entries = (1..=days)
        .map(|day| {
            let (entry, exit) = if day % 3 == 0 {
                ("22:00", "06:00")
            } else {
                ("08:00", "17:30")
            };
            let mut entry = DailyEntry::from_times(day, Some(entry), Some(exit)).unwrap();
            if day % 3 == 0 {
                entry.night_work_hours = entry.hours_worked;
            }
            if day % 7 == 0 {
                entry.overtime_hours = Decimal::from(2);
            }
            entry
        })
        .collect();

    WorkLog {
        employee_id: "emp_bench_0000".to_string(),
        period: "2025-03".to_string(),
        entries,
    }
}

fn create_request_body(days: u8) -> String {
    let entries: Vec<serde_json::Value> = (1..=days)
        .map(|day| serde_json::json!({ "day": day, "entry_time": "08:00", "exit_time": "17:30" }))
        .collect();

    serde_json::json!({
        "employee": { "id": "emp_bench_0000", "name": "Bench", "children_count": 2, "entry_time": "08:10" },
        "work_log": { "period": "2025-03", "entries": entries }
    })
    .to_string()
}

/// Benchmark: Single payroll calculation from aggregated hours.
fn bench_single_payroll(c: &mut Criterion) {
    let config = load_config();
    let totals = aggregate_work_log(&create_work_log(22), 1).unwrap().totals;
    let input = PayrollInput::new(totals, &create_employee(1), config.policy(), Decimal::ZERO);

    c.bench_function("single_payroll", |b| {
        b.iter(|| black_box(calculate_payroll(black_box(&input), config.statutory()).unwrap()))
    });
}

/// Benchmark: Aggregating a full month.
fn bench_aggregate_month(c: &mut Criterion) {
    let log = create_work_log(31);

    c.bench_function("aggregate_31_days", |b| {
        b.iter(|| black_box(aggregate_work_log(black_box(&log), 1).unwrap()))
    });
}

/// Benchmark: `/calculate` over HTTP with a full month of entries.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::in_memory(load_config()));
    let body = create_request_body(22);

    c.bench_function("http_calculate_month", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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

/// Benchmark: Batch of 1000 payrolls through the engine.
fn bench_batch_1000(c: &mut Criterion) {
    let config = load_config();
    let log = create_work_log(22);
    let inputs: Vec<PayrollInput> = (0..1000)
        .map(|i| {
            let totals = aggregate_work_log(&log, 1).unwrap().totals;
            PayrollInput::new(totals, &create_employee(i), config.policy(), Decimal::from(i))
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let results: Vec<_> = inputs
                .iter()
                .map(|input| calculate_payroll(input, config.statutory()).unwrap())
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Various entry counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::in_memory(load_config());

    let mut group = c.benchmark_group("scaling");

    for days in [1u8, 7, 14, 22, 31].iter() {
        let router = create_router(state.clone());
        let body = create_request_body(*days);

        group.throughput(Throughput::Elements(u64::from(*days)));
        group.bench_with_input(BenchmarkId::new("entries", days), days, |b, _| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
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

    group.finish();
}

criterion_group!(
    benches,
    bench_single_payroll,
    bench_aggregate_month,
    bench_http_calculate,
    bench_batch_1000,
    bench_scaling,
);
criterion_main!(benches);
