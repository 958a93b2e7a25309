//! Discount resolution.
//!
//! Decides which of the attendance and family discounts apply to a month,
//! combines them according to the configured [`CombinationRule`] and applies
//! the result to the pre-discount charge.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CombinationRule, DiscountConfig};
use crate::models::{DiscountResolution, MonthAggregate, MonthlyBilling};

/// Smallest family that can receive a family discount.
const MIN_FAMILY_SIZE: u32 = 2;

/// Attendance days needed to reach `threshold_pct` of `total_business_days`.
///
/// `ceil(total * threshold / 100)`.
///
/// # Example
///
/// ```
/// use comedor_billing::calculation::min_attendance_days;
/// use rust_decimal::Decimal;
///
/// assert_eq!(min_attendance_days(23, Decimal::new(80, 0)), 19);
/// ```
pub fn min_attendance_days(total_business_days: u32, threshold_pct: Decimal) -> u32 {
    (Decimal::from(total_business_days) * threshold_pct / Decimal::ONE_HUNDRED)
        .ceil()
        .to_u32()
        .unwrap_or(total_business_days)
}

/// Returns true when `attendance_days / total_business_days >= threshold / 100`.
///
/// A month without business days never meets the threshold.
pub fn meets_attendance_threshold(
    attendance_days: u32,
    total_business_days: u32,
    threshold_pct: Decimal,
) -> bool {
    total_business_days > 0
        && Decimal::from(attendance_days) * Decimal::ONE_HUNDRED
            >= threshold_pct * Decimal::from(total_business_days)
}

/// Combines the applicable discount percentages. `None` means the discount
/// does not apply.
///
/// The result is clamped to 0..=100.
pub fn combine(
    rule: CombinationRule,
    attendance: Option<Decimal>,
    family: Option<Decimal>,
) -> Decimal {
    let pct = match rule {
        CombinationRule::Highest => match (attendance, family) {
            (Some(a), Some(f)) => a.max(f),
            (a, f) => a.or(f).unwrap_or(Decimal::ZERO),
        },
        CombinationRule::AttendancePriority => attendance.or(family).unwrap_or(Decimal::ZERO),
        CombinationRule::FamilyPriority => family.or(attendance).unwrap_or(Decimal::ZERO),
        CombinationRule::Compound => {
            let a = attendance.unwrap_or(Decimal::ZERO);
            let f = family.unwrap_or(Decimal::ZERO);
            Decimal::ONE_HUNDRED
                - (Decimal::ONE_HUNDRED - a) * (Decimal::ONE_HUNDRED - f) / Decimal::ONE_HUNDRED
        }
    };

    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Resolves the discount for one person's month.
///
/// `family_enrolled_count` is the number of members of the person's family
/// enrolled in the same month, the person included. Families need at least
/// `family_min_members`, and never fewer than two, for the family discount.
///
/// # Example
///
/// ```
/// use comedor_billing::calculation::resolve_discount;
/// use comedor_billing::config::{CombinationRule, DiscountConfig};
/// use rust_decimal::Decimal;
///
/// let config = DiscountConfig {
///     id: "curso".to_string(),
///     active: true,
///     attendance_threshold_pct: Decimal::new(80, 0),
///     attendance_discount_pct: Decimal::new(18, 0),
///     family_discount_pct: Decimal::new(10, 0),
///     family_min_members: 3,
///     advance_notice_days: 2,
///     combination_rule: CombinationRule::Highest,
/// };
///
/// let resolution = resolve_discount(19, 23, 1, &config);
/// assert!(resolution.attendance_discount_applies);
/// assert_eq!(resolution.effective_discount_pct, Decimal::new(18, 0));
///
/// let resolution = resolve_discount(18, 23, 1, &config);
/// assert!(!resolution.attendance_discount_applies);
/// assert_eq!(resolution.min_attendance_days, 19);
/// ```
pub fn resolve_discount(
    attendance_days: u32,
    total_business_days: u32,
    family_enrolled_count: u32,
    config: &DiscountConfig,
) -> DiscountResolution {
    let min_days = min_attendance_days(total_business_days, config.attendance_threshold_pct);
    let attendance_applies = meets_attendance_threshold(
        attendance_days,
        total_business_days,
        config.attendance_threshold_pct,
    );

    let family_min = config.family_min_members.max(MIN_FAMILY_SIZE);
    let family_applies = family_enrolled_count >= family_min;

    let effective = combine(
        config.combination_rule,
        attendance_applies.then_some(config.attendance_discount_pct),
        family_applies.then_some(config.family_discount_pct),
    );

    let attendance_reason = if total_business_days == 0 {
        "no business days in the month".to_string()
    } else {
        format!(
            "attendance {}/{} days ({}%) {} the {}% threshold (minimum {} days)",
            attendance_days,
            total_business_days,
            (Decimal::from(attendance_days) * Decimal::ONE_HUNDRED
                / Decimal::from(total_business_days))
            .round_dp(2)
            .normalize(),
            if attendance_applies { "meets" } else { "is below" },
            config.attendance_threshold_pct.normalize(),
            min_days
        )
    };
    let family_reason = format!(
        "family discount {} ({} of {} members enrolled)",
        if family_applies { "applies" } else { "does not apply" },
        family_enrolled_count,
        family_min
    );

    DiscountResolution {
        attendance_discount_applies: attendance_applies,
        family_discount_applies: family_applies,
        effective_discount_pct: effective,
        min_attendance_days: min_days,
        reasoning: format!(
            "{}; {}; effective discount {}%",
            attendance_reason,
            family_reason,
            effective.normalize()
        ),
    }
}

/// Applies a discount percentage to a charge.
///
/// `charge * (1 - pct / 100)`, rounded half-up to cents and never negative.
/// The result always carries two decimal places.
pub fn apply_discount(charge: Decimal, discount_pct: Decimal) -> Decimal {
    let mut total = (charge * (Decimal::ONE_HUNDRED - discount_pct) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO);
    total.rescale(2);
    total
}

/// Resolves and applies the discount to an aggregated month.
pub fn bill_month(
    aggregate: MonthAggregate,
    family_enrolled_count: u32,
    config: &DiscountConfig,
) -> MonthlyBilling {
    let discount = resolve_discount(
        aggregate.attendance_days,
        aggregate.total_business_days,
        family_enrolled_count,
        config,
    );
    let final_total = apply_discount(aggregate.charge, discount.effective_discount_pct);

    MonthlyBilling {
        person_id: aggregate.person_id,
        billable_days: aggregate.billable_days,
        attendance_days: aggregate.attendance_days,
        total_business_days: aggregate.total_business_days,
        charge: aggregate.charge,
        discount_pct: discount.effective_discount_pct,
        final_total,
        discount,
        day_lines: aggregate.day_lines,
        warnings: aggregate.warnings,
    }
}
