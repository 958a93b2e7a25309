//! Business-day calendar.
//!
//! Pure functions of (year, month, holiday set): no clock, no I/O.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarDate, Holiday};

/// Returns the first and last day of a month.
///
/// # Errors
///
/// Returns `InvalidPeriod` when `month` is not in 1..=12 or the year is out
/// of chrono's range.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(CalendarDate, CalendarDate)> {
    let invalid = || EngineError::InvalidPeriod { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first.into(), last.into()))
}

/// Lists the Monday-Friday dates of a month that are not holidays.
///
/// The result is sorted ascending. A holiday on a weekend changes nothing.
///
/// # Errors
///
/// Returns `InvalidPeriod` for a month outside 1..=12.
///
/// # Example
///
/// ```
/// use comedor_billing::calculation::business_days;
/// use std::collections::BTreeSet;
///
/// // October 2024 runs Tuesday 1st to Thursday 31st
/// let days = business_days(2024, 10, &BTreeSet::new()).unwrap();
/// assert_eq!(days.len(), 23);
/// ```
pub fn business_days(
    year: i32,
    month: u32,
    holidays: &BTreeSet<CalendarDate>,
) -> EngineResult<Vec<CalendarDate>> {
    let (first, last) = month_bounds(year, month)?;

    Ok(first
        .date()
        .iter_days()
        .take_while(|d| *d <= last.date())
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .map(CalendarDate::from)
        .filter(|d| !holidays.contains(d))
        .collect())
}

/// Collects the dates of active holidays.
pub fn active_holiday_dates<'a, I>(holidays: I) -> BTreeSet<CalendarDate>
where
    I: IntoIterator<Item = &'a Holiday>,
{
    holidays
        .into_iter()
        .filter(|h| h.active)
        .map(|h| h.date)
        .collect()
}
