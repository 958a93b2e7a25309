//! Calculation logic for the billing engine.
//!
//! This module contains the business-day calendar, the per-day eligibility
//! classifier, the monthly aggregator, the discount resolver and the report
//! builder that composes them for a whole snapshot.

mod aggregator;
mod calendar;
mod classifier;
mod discount;
mod report;
mod sources;

pub use aggregator::{INVALID_DATE_RANGE, aggregate_month, select_enrollment};
pub use calendar::{active_holiday_dates, business_days, month_bounds};
pub use classifier::{DayFacts, classify, classify_day};
pub use discount::{
    apply_discount, bill_month, combine, meets_attendance_threshold, min_attendance_days,
    resolve_discount,
};
pub use report::{bill_person, billing_group, build_monthly_report};
pub use sources::PersonSources;
