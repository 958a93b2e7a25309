//! Result models for a person's billing month.
//!
//! This module contains the per-day classification, the monthly aggregate,
//! the discount resolution and the [`MonthlyBilling`] value that combines
//! them for export collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalendarDate;

/// The single outcome of classifying one person on one business day.
///
/// Variants are listed in precedence order: the first that matches wins.
///
/// # Example
///
/// ```
/// use comedor_billing::models::DayCategory;
///
/// assert!(DayCategory::Enrolled.is_billable());
/// assert!(!DayCategory::Invitation.is_billable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// Free meal granted by the administration.
    Invitation,
    /// School holiday.
    Holiday,
    /// Reported absence.
    Absence,
    /// Approved one-time request.
    OneTimeRequest,
    /// Regular enrolled day.
    Enrolled,
    /// No service for this person on this day.
    NoService,
}

impl DayCategory {
    /// Returns true for the categories that incur a charge.
    pub fn is_billable(self) -> bool {
        matches!(self, DayCategory::OneTimeRequest | DayCategory::Enrolled)
    }
}

/// The classifier's verdict for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The winning category.
    pub category: DayCategory,
    /// Whether the day is charged.
    pub billable: bool,
    /// Whether the day counts toward the attendance percentage.
    pub counts_as_attendance: bool,
    /// Price charged for the day (zero unless billable).
    pub price: Decimal,
}

/// One business day of a person's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLine {
    /// The business day.
    pub date: CalendarDate,
    /// The winning category.
    pub category: DayCategory,
    /// Whether the day is charged.
    pub billable: bool,
    /// Whether the day counts toward the attendance percentage.
    pub counts_as_attendance: bool,
    /// Price charged for the day.
    pub price: Decimal,
    /// Enrollment governing the day, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<String>,
}

/// A non-fatal data problem found while billing a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// Totals of one person's month before discounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAggregate {
    /// The billed person.
    pub person_id: String,
    /// Billing year.
    pub year: i32,
    /// Billing month (1-12).
    pub month: u32,
    /// Days in `OneTimeRequest` or `Enrolled`.
    pub billable_days: u32,
    /// Days counting toward the attendance percentage.
    pub attendance_days: u32,
    /// All business days in the month; the attendance denominator.
    pub total_business_days: u32,
    /// Business days covered by the person's enrollment schedule.
    pub scheduled_days: u32,
    /// Sum of billable day prices.
    pub charge: Decimal,
    /// Price of the enrollment governing the latest covered day.
    pub daily_price: Option<Decimal>,
    /// One line per business day, in date order.
    pub day_lines: Vec<DayLine>,
    /// Data problems that did not prevent billing.
    pub warnings: Vec<BillingWarning>,
}

/// Which discounts apply to a person's month and the resulting percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResolution {
    /// The attendance ratio met the configured threshold.
    pub attendance_discount_applies: bool,
    /// The family met the configured member count.
    pub family_discount_applies: bool,
    /// Percentage taken off the charge, after the combination rule.
    pub effective_discount_pct: Decimal,
    /// Attendance days needed to reach the threshold this month.
    pub min_attendance_days: u32,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The engine's output for one person and one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBilling {
    /// The billed person.
    pub person_id: String,
    /// Days in `OneTimeRequest` or `Enrolled`.
    pub billable_days: u32,
    /// Days counting toward the attendance percentage.
    pub attendance_days: u32,
    /// All business days in the month.
    pub total_business_days: u32,
    /// Charge before discount.
    pub charge: Decimal,
    /// Effective discount percentage.
    pub discount_pct: Decimal,
    /// Charge after discount, rounded half-up to cents.
    pub final_total: Decimal,
    /// How the discount was decided.
    pub discount: DiscountResolution,
    /// Per-day breakdown.
    pub day_lines: Vec<DayLine>,
    /// Data problems that did not prevent billing.
    pub warnings: Vec<BillingWarning>,
}
