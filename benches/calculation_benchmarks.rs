//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure calculators and a full payslip over HTTP:
//! - Day-type pay for a single day
//! - Statutory contributions for a monthly salary
//! - Base hours for a half-month period
//! - Payslip composition for 1 to 16 worked days
//! - A batch of 100 payslip requests through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    DayHours, EmploymentWindow, PayslipInput, calculate_base_hours, calculate_contributions,
    calculate_day_pay, compose_payslip,
};
use payroll_engine::config::{ConfigLoader, PayrollSettings};
use payroll_engine::models::{ClockInterval, DayType, PayPeriod, RestDayPolicy};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ph").expect("Failed to load config");
    AppState::new(config)
}

fn make_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One 08:00 to 18:00 (UTC+8) interval per day from 2026-01-16.
fn create_intervals(employee_ref: &str, day_count: usize) -> Vec<ClockInterval> {
    (0..day_count)
        .map(|i| {
            let start = Utc.with_ymd_and_hms(2026, 1, 16, 0, 0, 0).unwrap() + Duration::days(i as i64);
            ClockInterval {
                employee_ref: employee_ref.to_string(),
                start_timestamp: start,
                end_timestamp: Some(start + Duration::hours(10)),
            }
        })
        .collect()
}

fn create_payslip_input(day_count: usize) -> PayslipInput {
    PayslipInput {
        employee_ref: "emp_bench_001".to_string(),
        reference_date: "2026-01-20".to_string(),
        daily_rate: Decimal::from(800),
        scheduled_hours: None,
        rest_days: RestDayPolicy::Office,
        employment: EmploymentWindow::default(),
        clock_intervals: create_intervals("emp_bench_001", day_count),
        holidays: vec![],
    }
}

/// Benchmark: Pricing a single sunday-regular-holiday day.
fn bench_day_pay(c: &mut Criterion) {
    let hours = DayHours {
        regular: Decimal::from(8),
        overtime: Decimal::from(2),
        night_diff: Decimal::from(3),
    };
    let rate = Decimal::new(8125, 2);

    c.bench_function("day_pay", |b| {
        b.iter(|| {
            black_box(calculate_day_pay(
                black_box(DayType::SundayRegularHoliday),
                black_box(hours),
                black_box(rate),
            ))
        })
    });
}

/// Benchmark: Contributions across the SSS table.
fn bench_contributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("contributions");

    for salary in [4_000, 15_000, 35_000, 120_000] {
        group.bench_with_input(BenchmarkId::new("salary", salary), &salary, |b, salary| {
            let salary = Decimal::from(*salary);
            b.iter(|| black_box(calculate_contributions(black_box(salary))))
        });
    }

    group.finish();
}

/// Benchmark: Base hours with absences and a mid-period hire.
fn bench_base_hours(c: &mut Criterion) {
    let period = PayPeriod::containing(make_date("2026-01-20"));
    let worked: BTreeSet<NaiveDate> = period.dates().step_by(2).collect();
    let holidays: BTreeSet<NaiveDate> = BTreeSet::new();
    let employment = EmploymentWindow {
        hire_date: Some(make_date("2026-01-19")),
        termination_date: None,
    };
    let settings = PayrollSettings::default();

    c.bench_function("base_hours", |b| {
        b.iter(|| {
            black_box(calculate_base_hours(
                &period,
                black_box(&worked),
                &RestDayPolicy::Office,
                &holidays,
                &employment,
                &settings,
            ))
        })
    });
}

/// Benchmark: Payslip composition scaling with worked days.
fn bench_payslip_scaling(c: &mut Criterion) {
    let settings = PayrollSettings::default();
    let mut group = c.benchmark_group("payslip");

    for day_count in [1, 4, 8, 16] {
        let input = create_payslip_input(day_count);

        group.throughput(Throughput::Elements(day_count as u64));
        group.bench_with_input(BenchmarkId::new("days", day_count), &input, |b, input| {
            b.iter(|| black_box(compose_payslip(input, &settings)))
        });
    }

    group.finish();
}

/// Benchmark: Batch of 100 payslip requests through the router.
fn bench_payslip_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let employee_ref = format!("emp_batch_{:03}", i);
            let request_json = serde_json::json!({
                "employee_ref": employee_ref,
                "reference_date": "2026-01-20",
                "daily_rate": format!("{}", 600 + i * 10),
                "clock_intervals": create_intervals(&employee_ref, 11)
            });
            serde_json::to_string(&request_json).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("payslip_batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/payslip")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_day_pay,
    bench_contributions,
    bench_base_hours,
    bench_payslip_scaling,
    bench_payslip_batch_100,
);
criterion_main!(benches);
