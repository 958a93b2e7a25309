//! Configuration types for cafeteria billing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

/// How the attendance and family discounts combine when both apply.
///
/// Discounts are never added together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationRule {
    /// The larger of the applicable percentages.
    Highest,
    /// The attendance discount when it applies, otherwise the family discount.
    AttendancePriority,
    /// The family discount when it applies, otherwise the attendance discount.
    FamilyPriority,
    /// Both applied in succession: `100 - (100 - a) * (100 - f) / 100`.
    Compound,
}

/// One row of discount configuration.
///
/// Only one row is active at a time; the active row is copied once at the
/// start of a billing run and never re-read during it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Identifier of the configuration row.
    pub id: String,
    /// Whether this row is the one in force.
    pub active: bool,
    /// Minimum attendance percentage for the attendance discount (e.g. 80).
    pub attendance_threshold_pct: Decimal,
    /// Attendance discount percentage (e.g. 18).
    pub attendance_discount_pct: Decimal,
    /// Multi-child family discount percentage.
    pub family_discount_pct: Decimal,
    /// Children enrolled in the same month needed for the family discount.
    pub family_min_members: u32,
    /// Days of notice families must give when reporting an absence.
    pub advance_notice_days: u32,
    /// How the two discounts combine.
    pub combination_rule: CombinationRule,
}

impl DiscountConfig {
    /// Checks that every percentage lies within 0..=100.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        let percentages = [
            ("attendance_threshold_pct", self.attendance_threshold_pct),
            ("attendance_discount_pct", self.attendance_discount_pct),
            ("family_discount_pct", self.family_discount_pct),
        ];

        for (field, value) in percentages {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("{} is outside 0..=100 in row '{}'", value, self.id),
                });
            }
        }

        Ok(())
    }

    /// Selects the single active row.
    ///
    /// # Errors
    ///
    /// - `MissingConfiguration` when no row is active.
    /// - `InvalidConfiguration` when several rows are active or the active row
    ///   fails [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```
    /// use comedor_billing::config::DiscountConfig;
    /// use comedor_billing::error::EngineError;
    ///
    /// let result = DiscountConfig::select_active(&[]);
    /// assert!(matches!(result, Err(EngineError::MissingConfiguration { .. })));
    /// ```
    pub fn select_active(configs: &[DiscountConfig]) -> EngineResult<&DiscountConfig> {
        let mut active = configs.iter().filter(|c| c.active);

        let selected = active
            .next()
            .ok_or_else(|| EngineError::MissingConfiguration {
                message: format!("0 of {} discount rows are active", configs.len()),
            })?;

        if let Some(other) = active.next() {
            return Err(EngineError::InvalidConfiguration {
                field: "active".to_string(),
                message: format!(
                    "rows '{}' and '{}' are both active",
                    selected.id, other.id
                ),
            });
        }

        selected.validate()?;
        Ok(selected)
    }
}

/// Prices that do not come from an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat price of an approved one-time request without an enrollment.
    pub one_time_price: Decimal,
}

impl PricingConfig {
    /// Rejects negative prices.
    pub fn validate(&self) -> EngineResult<()> {
        if self.one_time_price < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                field: "one_time_price".to_string(),
                message: format!("{} is negative", self.one_time_price),
            });
        }
        Ok(())
    }
}

/// Discounts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountsFile {
    /// Every configuration row, active or not.
    pub discounts: Vec<DiscountConfig>,
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// Calendar-wide holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The immutable parameters of one billing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingParameters {
    /// The active discount row.
    pub discount: DiscountConfig,
    /// Pricing outside enrollments.
    pub pricing: PricingConfig,
}

/// The complete billing configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// All discount rows.
    discounts: Vec<DiscountConfig>,
    /// Pricing configuration.
    pricing: PricingConfig,
    /// Configured holidays.
    holidays: Vec<Holiday>,
}

impl BillingConfig {
    /// Creates a new BillingConfig from its component parts.
    pub fn new(
        discounts: Vec<DiscountConfig>,
        pricing: PricingConfig,
        holidays: Vec<Holiday>,
    ) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            discounts,
            pricing,
            holidays: sorted_holidays,
        }
    }

    /// Returns the configured holidays, oldest first.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Takes the parameter snapshot for a billing run.
    ///
    /// # Errors
    ///
    /// Propagates [`DiscountConfig::select_active`] and
    /// [`PricingConfig::validate`] failures.
    pub fn snapshot(&self) -> EngineResult<BillingParameters> {
        let discount = DiscountConfig::select_active(&self.discounts)?.clone();
        self.pricing.validate()?;
        Ok(BillingParameters {
            discount,
            pricing: self.pricing.clone(),
        })
    }
}
