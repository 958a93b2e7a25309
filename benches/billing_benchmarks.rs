//! Performance benchmarks for the billing engine.
//!
//! - Single person month through the library
//! - Single person month through the HTTP router
//! - Batch reports of 100 and 1000 people
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use comedor_billing::api::{AppState, create_router};
use comedor_billing::calculation::{aggregate_month, build_monthly_report};
use comedor_billing::config::{BillingParameters, ConfigLoader};
use comedor_billing::models::{
    Absence, BillingSnapshot, CalendarDate, Enrollment, Invitation, OneTimeRequest, Person,
    PersonKind, RequestStatus, SchoolDay,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/comedor").expect("Failed to load config")
}

fn params() -> BillingParameters {
    load_config().snapshot().expect("No active discount configuration")
}

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse(s).expect("Invalid date")
}

/// Builds an October 2024 snapshot of `people` children, three per family,
/// with a mix of absences, one-time requests and invitations.
fn create_snapshot(people: usize) -> BillingSnapshot {
    let mut snapshot = BillingSnapshot::default();

    for i in 0..people {
        let id = format!("alu_{:04}", i);
        snapshot.people.push(Person {
            id: id.clone(),
            name: format!("Alumno {:04}", i),
            kind: if i % 10 == 9 {
                PersonKind::Staff
            } else {
                PersonKind::Child
            },
            family_id: Some(format!("fam_{:04}", i / 3)),
        });

        let weekdays: BTreeSet<SchoolDay> = match i % 3 {
            0 => [SchoolDay::Monday, SchoolDay::Wednesday].into_iter().collect(),
            1 => [
                SchoolDay::Monday,
                SchoolDay::Tuesday,
                SchoolDay::Wednesday,
                SchoolDay::Thursday,
            ]
            .into_iter()
            .collect(),
            _ => [
                SchoolDay::Monday,
                SchoolDay::Tuesday,
                SchoolDay::Wednesday,
                SchoolDay::Thursday,
                SchoolDay::Friday,
            ]
            .into_iter()
            .collect(),
        };
        snapshot.enrollments.push(Enrollment {
            id: format!("ins_{:04}", i),
            person_id: id.clone(),
            weekdays,
            daily_price: Decimal::new(550, 2),
            start_date: date("2024-09-09"),
            end_date: None,
            active: true,
        });

        if i % 4 == 0 {
            snapshot.absences.push(Absence {
                id: format!("baja_{:04}", i),
                person_id: id.clone(),
                dates: vec!["2024-10-08".to_string(), "09/10/2024".to_string()],
                reason: String::new(),
                created_at: None,
            });
        }
        if i % 5 == 0 {
            snapshot.one_time_requests.push(OneTimeRequest {
                id: format!("sol_{:04}", i),
                person_id: id.clone(),
                date: date("2024-10-11"),
                status: RequestStatus::Approved,
            });
        }
        if i % 7 == 0 {
            snapshot.invitations.push(Invitation {
                id: format!("inv_{:04}", i),
                person_id: Some(id),
                guest_name: None,
                date: "15/10/2024".to_string(),
                reason: String::new(),
            });
        }
    }

    snapshot
}

fn bench_single_person(c: &mut Criterion) {
    let snapshot = create_snapshot(1);
    let records = snapshot.records_for("alu_0000");
    let holidays = BTreeSet::new();
    let price = Decimal::new(620, 2);

    c.bench_function("single_person_month", |b| {
        b.iter(|| {
            black_box(
                aggregate_month(
                    black_box("alu_0000"),
                    2024,
                    10,
                    &records,
                    &holidays,
                    price,
                )
                .unwrap(),
            )
        })
    });
}

fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let mut body = serde_json::to_value(create_snapshot(1)).unwrap();
    body["year"] = serde_json::json!(2024);
    body["month"] = serde_json::json!(10);
    let body = body.to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/billing/monthly")
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

fn bench_batch_reports(c: &mut Criterion) {
    let params = params();
    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000] {
        let snapshot = create_snapshot(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("report", size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(build_monthly_report(snapshot, 2024, 10, &params).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_person,
    bench_single_request,
    bench_batch_reports,
);
criterion_main!(benches);
