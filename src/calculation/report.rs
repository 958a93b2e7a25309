//! Monthly billing report for a whole snapshot.
//!
//! People are billed independently and in parallel. A person whose month
//! fails is reported in [`BillingReport::errors`] and does not affect anyone
//! else; only an invalid period or a missing configuration aborts the run.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::BillingParameters;
use crate::error::EngineResult;
use crate::models::{
    BillingGroup, BillingReport, BillingReportRow, BillingSnapshot, CalendarDate, GroupTotal,
    MonthAggregate, MonthlyBilling, Person, PersonBillingError, PersonRecords,
};

use super::aggregator::{aggregate_month, select_enrollment};
use super::calendar::{active_holiday_dates, business_days};
use super::discount::bill_month;

/// Returns the group a person's row is totalled into.
///
/// A child without a family id forms a family of one.
pub fn billing_group(person: &Person) -> BillingGroup {
    if person.is_staff() {
        BillingGroup::Staff
    } else {
        BillingGroup::Family {
            family_id: person
                .family_id
                .clone()
                .unwrap_or_else(|| person.id.clone()),
        }
    }
}

/// Bills one person's month.
///
/// `family_enrolled_count` is passed through to the discount resolver.
///
/// # Errors
///
/// Propagates [`aggregate_month`] failures.
pub fn bill_person(
    person_id: &str,
    year: i32,
    month: u32,
    records: &PersonRecords<'_>,
    holidays: &BTreeSet<CalendarDate>,
    family_enrolled_count: u32,
    params: &BillingParameters,
) -> EngineResult<MonthlyBilling> {
    let aggregate = aggregate_month(
        person_id,
        year,
        month,
        records,
        holidays,
        params.pricing.one_time_price,
    )?;
    Ok(bill_month(aggregate, family_enrolled_count, &params.discount))
}

/// Builds the billing report for every person in `snapshot`.
///
/// Only active snapshot holidays are applied. Rows are ordered by person
/// name, then id; group totals by group.
///
/// # Errors
///
/// Returns `InvalidPeriod` for a month outside 1..=12. Per-person failures
/// are collected in the report instead.
pub fn build_monthly_report(
    snapshot: &BillingSnapshot,
    year: i32,
    month: u32,
    params: &BillingParameters,
) -> EngineResult<BillingReport> {
    let start_time = Instant::now();

    let holidays = active_holiday_dates(&snapshot.holidays);
    let days = business_days(year, month, &holidays)?;
    let total_business_days = days.len() as u32;
    let index = index_records(snapshot);
    let no_records = PersonRecords::default();

    let aggregates: Vec<(&Person, EngineResult<MonthAggregate>)> = snapshot
        .people
        .par_iter()
        .map(|person| {
            let records = index.get(person.id.as_str()).unwrap_or(&no_records);
            let aggregate = aggregate_month(
                &person.id,
                year,
                month,
                records,
                &holidays,
                params.pricing.one_time_price,
            );
            (person, aggregate)
        })
        .collect();

    let family_counts = family_enrolled_counts(&snapshot.people, &index, &days);

    let mut rows = Vec::with_capacity(aggregates.len());
    let mut errors = Vec::new();
    for (person, aggregate) in aggregates {
        match aggregate {
            Ok(aggregate) => {
                let group = billing_group(person);
                let family_count = match &group {
                    BillingGroup::Family { family_id } => {
                        family_counts.get(family_id.as_str()).copied().unwrap_or(1)
                    }
                    BillingGroup::Staff => 1,
                };
                let daily_price = aggregate
                    .daily_price
                    .unwrap_or(params.pricing.one_time_price);
                let detail = bill_month(aggregate, family_count, &params.discount);

                rows.push(BillingReportRow {
                    person_id: person.id.clone(),
                    person_name: person.name.clone(),
                    kind: person.kind,
                    group,
                    billable_days: detail.billable_days,
                    daily_price,
                    discount_pct: detail.discount_pct,
                    subtotal: detail.charge,
                    final_total: detail.final_total,
                    detail,
                });
            }
            Err(err) => {
                warn!(
                    person_id = %person.id,
                    code = err.code(),
                    error = %err,
                    "Person could not be billed"
                );
                errors.push(PersonBillingError {
                    person_id: person.id.clone(),
                    person_name: person.name.clone(),
                    code: err.code().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    rows.sort_by(|a, b| {
        a.person_name
            .cmp(&b.person_name)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    errors.sort_by(|a, b| {
        a.person_name
            .cmp(&b.person_name)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });

    let group_totals = group_totals(&rows);
    let grand_total: Decimal = rows.iter().map(|r| r.final_total).sum();
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        year,
        month,
        people = snapshot.people.len(),
        billed = rows.len(),
        errors = errors.len(),
        grand_total = %grand_total,
        duration_us,
        "Monthly billing report built"
    );

    Ok(BillingReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year,
        month,
        total_business_days,
        discount_config_id: params.discount.id.clone(),
        rows,
        group_totals,
        errors,
        grand_total,
        duration_us,
    })
}

/// Splits the snapshot's records by person in a single pass.
fn index_records(snapshot: &BillingSnapshot) -> HashMap<&str, PersonRecords<'_>> {
    let mut index: HashMap<&str, PersonRecords<'_>> = HashMap::new();

    for enrollment in &snapshot.enrollments {
        index
            .entry(enrollment.person_id.as_str())
            .or_default()
            .enrollments
            .push(enrollment);
    }
    for absence in &snapshot.absences {
        index
            .entry(absence.person_id.as_str())
            .or_default()
            .absences
            .push(absence);
    }
    for request in &snapshot.one_time_requests {
        index
            .entry(request.person_id.as_str())
            .or_default()
            .one_time_requests
            .push(request);
    }
    for invitation in &snapshot.invitations {
        // Guest invitations have no person to bill
        if let Some(person_id) = invitation.person_id.as_deref() {
            index.entry(person_id).or_default().invitations.push(invitation);
        }
    }

    index
}

/// Returns true when the person has a scheduled day or an approved request
/// on one of `days`.
///
/// Reads only enrollments and request statuses, which carry no free-text
/// dates, so it holds even when the person's month fails to aggregate.
fn is_served(records: &PersonRecords<'_>, days: &[CalendarDate]) -> bool {
    let approved: BTreeSet<CalendarDate> = records
        .one_time_requests
        .iter()
        .filter(|r| r.is_approved())
        .map(|r| r.date)
        .collect();

    days.iter().any(|day| {
        approved.contains(day)
            || select_enrollment(&records.enrollments, *day)
                .is_some_and(|e| e.is_scheduled(*day))
    })
}

/// Counts, per family, the children served at least once in the month.
fn family_enrolled_counts(
    people: &[Person],
    index: &HashMap<&str, PersonRecords<'_>>,
    days: &[CalendarDate],
) -> HashMap<String, u32> {
    let mut counts = HashMap::new();

    for person in people {
        let BillingGroup::Family { family_id } = billing_group(person) else {
            continue;
        };
        let served = index
            .get(person.id.as_str())
            .is_some_and(|records| is_served(records, days));
        if served {
            *counts.entry(family_id).or_insert(0) += 1;
        }
    }

    counts
}

fn group_totals(rows: &[BillingReportRow]) -> Vec<GroupTotal> {
    let mut totals: BTreeMap<&BillingGroup, GroupTotal> = BTreeMap::new();

    for row in rows {
        let total = totals.entry(&row.group).or_insert_with(|| GroupTotal {
            group: row.group.clone(),
            members: 0,
            subtotal: Decimal::ZERO,
            final_total: Decimal::ZERO,
        });
        total.members += 1;
        total.subtotal += row.subtotal;
        total.final_total += row.final_total;
    }

    totals.into_values().collect()
}
