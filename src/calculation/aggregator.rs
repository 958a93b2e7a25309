//! Monthly aggregation of classified days for one person.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BillingWarning, CalendarDate, DayLine, Enrollment, MonthAggregate, PersonRecords,
};

use super::calendar::business_days;
use super::classifier::classify;
use super::sources::PersonSources;

/// Warning code for an enrollment whose end date precedes its start date.
pub const INVALID_DATE_RANGE: &str = "INVALID_DATE_RANGE";

/// Picks the enrollment governing `date`.
///
/// When several enrollments cover the day, the active one wins, then the one
/// with the latest start date.
pub fn select_enrollment<'a>(
    enrollments: &[&'a Enrollment],
    date: CalendarDate,
) -> Option<&'a Enrollment> {
    enrollments
        .iter()
        .copied()
        .filter(|e| e.is_in_effect(date))
        .max_by(|a, b| {
            a.active
                .cmp(&b.active)
                .then_with(|| a.start_date.cmp(&b.start_date))
        })
}

/// Aggregates one person's month.
///
/// Walks every business day, classifies it and accumulates the billable and
/// attendance counts and the pre-discount charge. `total_business_days` is
/// the number of business days in the month whatever the person's schedule.
///
/// Enrollments with an inverted date range are treated as never active and
/// reported as an `INVALID_DATE_RANGE` warning on the result.
///
/// # Errors
///
/// - `InvalidPeriod` for a month outside 1..=12.
/// - `InvalidEnrollment` for a negative daily price.
/// - `AmbiguousDateEncoding` for an unreadable absence or invitation date.
///
/// # Example
///
/// ```
/// use comedor_billing::calculation::aggregate_month;
/// use comedor_billing::models::{CalendarDate, Enrollment, PersonRecords, SchoolDay};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// let enrollment = Enrollment {
///     id: "ins_001".to_string(),
///     person_id: "alu_001".to_string(),
///     weekdays: [SchoolDay::Monday].into_iter().collect(),
///     daily_price: Decimal::new(550, 2),
///     start_date: CalendarDate::parse("2024-09-09").unwrap(),
///     end_date: None,
///     active: true,
/// };
/// let records = PersonRecords {
///     enrollments: vec![&enrollment],
///     ..PersonRecords::default()
/// };
///
/// let price = Decimal::new(620, 2);
/// let month = aggregate_month("alu_001", 2024, 10, &records, &BTreeSet::new(), price).unwrap();
///
/// // Mondays of October 2024: 7, 14, 21, 28
/// assert_eq!(month.billable_days, 4);
/// assert_eq!(month.total_business_days, 23);
/// assert_eq!(month.charge, Decimal::new(2200, 2));
/// ```
pub fn aggregate_month(
    person_id: &str,
    year: i32,
    month: u32,
    records: &PersonRecords<'_>,
    holidays: &BTreeSet<CalendarDate>,
    one_time_price: Decimal,
) -> EngineResult<MonthAggregate> {
    let days = business_days(year, month, holidays)?;

    let mut warnings = Vec::new();
    let mut enrollments = Vec::with_capacity(records.enrollments.len());
    for enrollment in records.enrollments.iter().copied() {
        if enrollment.daily_price < Decimal::ZERO {
            return Err(EngineError::InvalidEnrollment {
                enrollment_id: enrollment.id.clone(),
                message: format!("daily price {} is negative", enrollment.daily_price),
            });
        }
        if !enrollment.has_valid_range() {
            warn!(
                person_id = %person_id,
                enrollment_id = %enrollment.id,
                "Enrollment ends before it starts; treated as never active"
            );
            warnings.push(BillingWarning {
                code: INVALID_DATE_RANGE.to_string(),
                message: format!(
                    "Enrollment '{}' ends {} before it starts {}; ignored",
                    enrollment.id,
                    enrollment.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    enrollment.start_date
                ),
            });
            continue;
        }
        enrollments.push(enrollment);
    }

    let sources = PersonSources::collect(
        records.absences.iter().copied(),
        records.one_time_requests.iter().copied(),
        records.invitations.iter().copied(),
    )?;

    let mut billable_days = 0u32;
    let mut attendance_days = 0u32;
    let mut scheduled_days = 0u32;
    let mut charge = Decimal::ZERO;
    let mut daily_price = None;
    let mut day_lines = Vec::with_capacity(days.len());

    for date in &days {
        let enrollment = select_enrollment(&enrollments, *date);
        let classification = classify(*date, enrollment, &sources, holidays, one_time_price);

        if let Some(e) = enrollment {
            daily_price = Some(e.daily_price);
            if e.is_scheduled(*date) {
                scheduled_days += 1;
            }
        }
        if classification.billable {
            billable_days += 1;
            charge += classification.price;
        }
        if classification.counts_as_attendance {
            attendance_days += 1;
        }

        day_lines.push(DayLine {
            date: *date,
            category: classification.category,
            billable: classification.billable,
            counts_as_attendance: classification.counts_as_attendance,
            price: classification.price,
            enrollment_id: enrollment.map(|e| e.id.clone()),
        });
    }

    debug!(
        person_id = %person_id,
        year,
        month,
        billable_days,
        attendance_days,
        total_business_days = days.len(),
        charge = %charge,
        "Aggregated billing month"
    );

    Ok(MonthAggregate {
        person_id: person_id.to_string(),
        year,
        month,
        billable_days,
        attendance_days,
        total_business_days: days.len() as u32,
        scheduled_days,
        charge,
        daily_price,
        day_lines,
        warnings,
    })
}
