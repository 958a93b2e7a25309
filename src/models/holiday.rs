//! School holiday model.

use serde::{Deserialize, Serialize};

use super::CalendarDate;

/// A calendar-wide non-service day.
///
/// Holidays apply to every person. Inactive rows are kept for history and
/// ignored by the calendar.
///
/// # Example
///
/// ```
/// use comedor_billing::models::{CalendarDate, Holiday};
///
/// let holiday = Holiday {
///     date: CalendarDate::parse("2024-11-01").unwrap(),
///     name: "Todos los Santos".to_string(),
///     active: true,
/// };
/// assert!(holiday.active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: CalendarDate,
    /// The name of the holiday.
    #[serde(default)]
    pub name: String,
    /// Whether the holiday is currently applied.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
