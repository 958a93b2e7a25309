//! Eligibility classification of a single (person, day) pair.
//!
//! Every caller that needs to know whether a day is billed goes through
//! [`classify_day`] or [`classify`]; there is no second copy of the
//! precedence rules.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalendarDate, DayCategory, DayClassification, Enrollment};

use super::sources::PersonSources;

/// What each source says about one person on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFacts {
    /// An invitation exists for the person on the day.
    pub invited: bool,
    /// The day is a holiday.
    pub holiday: bool,
    /// The person reported an absence for the day.
    pub absent: bool,
    /// An approved one-time request exists for the day.
    pub approved_request: bool,
}

/// Classifies one day from pre-computed facts.
///
/// Precedence, first match wins:
///
/// 1. Invitation: free. Counts as attendance if the day is scheduled.
/// 2. Holiday: free. Counts as attendance if the day is scheduled.
/// 3. Absence: free, not attended.
/// 4. Approved one-time request: billed at the enrollment's daily price, or
///    at `one_time_price` when no enrollment governs the day.
/// 5. Scheduled enrollment day: billed at the daily price.
/// 6. Otherwise no service; outside both attendance numerator and charge.
///
/// `enrollment` is the enrollment governing `date`, if any; it need not
/// include the day's weekday.
///
/// # Example
///
/// ```
/// use comedor_billing::calculation::{classify_day, DayFacts};
/// use comedor_billing::models::{CalendarDate, DayCategory};
/// use rust_decimal::Decimal;
///
/// let day = CalendarDate::parse("2024-10-08").unwrap();
/// let facts = DayFacts { approved_request: true, ..DayFacts::default() };
/// let result = classify_day(day, None, facts, Decimal::new(620, 2));
///
/// assert_eq!(result.category, DayCategory::OneTimeRequest);
/// assert_eq!(result.price, Decimal::new(620, 2));
/// ```
pub fn classify_day(
    date: CalendarDate,
    enrollment: Option<&Enrollment>,
    facts: DayFacts,
    one_time_price: Decimal,
) -> DayClassification {
    let scheduled = enrollment.is_some_and(|e| e.is_scheduled(date));

    if facts.invited {
        return free_day(DayCategory::Invitation, scheduled);
    }

    if facts.holiday {
        return free_day(DayCategory::Holiday, scheduled);
    }

    if facts.absent {
        return free_day(DayCategory::Absence, false);
    }

    if facts.approved_request {
        let price = enrollment.map_or(one_time_price, |e| e.daily_price);
        return billed_day(DayCategory::OneTimeRequest, price);
    }

    match enrollment {
        Some(e) if scheduled => billed_day(DayCategory::Enrolled, e.daily_price),
        _ => free_day(DayCategory::NoService, false),
    }
}

/// Classifies one day directly from a person's normalized sources.
pub fn classify(
    date: CalendarDate,
    enrollment: Option<&Enrollment>,
    sources: &PersonSources,
    holidays: &BTreeSet<CalendarDate>,
    one_time_price: Decimal,
) -> DayClassification {
    classify_day(
        date,
        enrollment,
        sources.facts_for(date, holidays),
        one_time_price,
    )
}

fn free_day(category: DayCategory, counts_as_attendance: bool) -> DayClassification {
    DayClassification {
        category,
        billable: false,
        counts_as_attendance,
        price: Decimal::ZERO,
    }
}

fn billed_day(category: DayCategory, price: Decimal) -> DayClassification {
    DayClassification {
        category,
        billable: true,
        counts_as_attendance: true,
        price,
    }
}
