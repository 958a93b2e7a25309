//! Recurring meal-service enrollment ("inscripción").

use std::collections::BTreeSet;

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalendarDate;

/// A school day on which a person can be enrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolDay {
    /// Monday.
    #[serde(alias = "mon")]
    Monday,
    /// Tuesday.
    #[serde(alias = "tue")]
    Tuesday,
    /// Wednesday.
    #[serde(alias = "wed")]
    Wednesday,
    /// Thursday.
    #[serde(alias = "thu")]
    Thursday,
    /// Friday.
    #[serde(alias = "fri")]
    Friday,
}

impl SchoolDay {
    /// Maps a chrono weekday to a school day; weekends have none.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(SchoolDay::Monday),
            Weekday::Tue => Some(SchoolDay::Tuesday),
            Weekday::Wed => Some(SchoolDay::Wednesday),
            Weekday::Thu => Some(SchoolDay::Thursday),
            Weekday::Fri => Some(SchoolDay::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}

/// A weekly meal-service registration for one person.
///
/// At most one enrollment per person is active; superseded enrollments are
/// deactivated and their `end_date` stamped, and still bill the days they
/// covered.
///
/// # Example
///
/// ```
/// use comedor_billing::models::{CalendarDate, Enrollment, SchoolDay};
/// use rust_decimal::Decimal;
///
/// let enrollment = Enrollment {
///     id: "ins_001".to_string(),
///     person_id: "alu_001".to_string(),
///     weekdays: [SchoolDay::Monday, SchoolDay::Wednesday].into_iter().collect(),
///     daily_price: Decimal::new(550, 2),
///     start_date: CalendarDate::parse("2024-09-09").unwrap(),
///     end_date: None,
///     active: true,
/// };
///
/// // 2024-10-07 is a Monday, 2024-10-08 a Tuesday
/// assert!(enrollment.is_scheduled(CalendarDate::parse("2024-10-07").unwrap()));
/// assert!(!enrollment.is_scheduled(CalendarDate::parse("2024-10-08").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier for the enrollment.
    pub id: String,
    /// The enrolled person.
    pub person_id: String,
    /// Days of the week the person eats at the cafeteria.
    pub weekdays: BTreeSet<SchoolDay>,
    /// Price charged per enrolled day.
    pub daily_price: Decimal,
    /// First day covered (inclusive).
    pub start_date: CalendarDate,
    /// Last day covered (inclusive); open-ended when absent.
    #[serde(default)]
    pub end_date: Option<CalendarDate>,
    /// Whether this is the person's current enrollment.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Enrollment {
    /// Returns false when `end_date` precedes `start_date`.
    pub fn has_valid_range(&self) -> bool {
        self.end_date.is_none_or(|end| end >= self.start_date)
    }

    /// Returns true when the enrollment governs `date`, whatever its weekday.
    ///
    /// Records with an inverted range never apply, and a deactivated record
    /// without an end date has no known coverage and never applies either.
    pub fn is_in_effect(&self, date: CalendarDate) -> bool {
        if !self.has_valid_range() || (!self.active && self.end_date.is_none()) {
            return false;
        }
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Returns true when the weekday of `date` is one of the enrolled days.
    pub fn attends_on(&self, date: CalendarDate) -> bool {
        SchoolDay::from_weekday(date.weekday()).is_some_and(|day| self.weekdays.contains(&day))
    }

    /// Returns true when the person is expected at the cafeteria on `date`.
    pub fn is_scheduled(&self, date: CalendarDate) -> bool {
        self.is_in_effect(date) && self.attends_on(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn create_test_enrollment(end_date: Option<&str>, active: bool) -> Enrollment {
        Enrollment {
            id: "ins_001".to_string(),
            person_id: "alu_001".to_string(),
            weekdays: [
                SchoolDay::Monday,
                SchoolDay::Tuesday,
                SchoolDay::Wednesday,
                SchoolDay::Thursday,
            ]
            .into_iter()
            .collect(),
            daily_price: Decimal::new(550, 2),
            start_date: date("2024-09-09"),
            end_date: end_date.map(date),
            active,
        }
    }

    #[test]
    fn test_deserialize_enrollment() {
        let json = r#"{
            "id": "ins_002",
            "person_id": "alu_002",
            "weekdays": ["monday", "fri"],
            "daily_price": "5.50",
            "start_date": "09/09/2024"
        }"#;

        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert!(enrollment.active);
        assert!(enrollment.end_date.is_none());
        assert_eq!(enrollment.daily_price, Decimal::new(550, 2));
        assert_eq!(enrollment.start_date, date("2024-09-09"));
        assert!(enrollment.weekdays.contains(&SchoolDay::Monday));
        assert!(enrollment.weekdays.contains(&SchoolDay::Friday));
    }

    #[test]
    fn test_weekend_is_never_a_school_day() {
        assert_eq!(SchoolDay::from_weekday(Weekday::Sat), None);
        assert_eq!(SchoolDay::from_weekday(Weekday::Sun), None);
        assert_eq!(
            SchoolDay::from_weekday(Weekday::Wed),
            Some(SchoolDay::Wednesday)
        );
    }

    #[test]
    fn test_open_ended_enrollment_in_effect() {
        let enrollment = create_test_enrollment(None, true);
        assert!(enrollment.is_in_effect(date("2030-01-07")));
        assert!(!enrollment.is_in_effect(date("2024-09-06")));
        assert!(enrollment.is_in_effect(date("2024-09-09")));
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let enrollment = create_test_enrollment(Some("2024-10-15"), false);
        assert!(enrollment.is_in_effect(date("2024-10-15")));
        assert!(!enrollment.is_in_effect(date("2024-10-16")));
    }

    #[test]
    fn test_inverted_range_never_in_effect() {
        let mut enrollment = create_test_enrollment(Some("2024-09-01"), true);
        enrollment.start_date = date("2024-10-01");
        assert!(!enrollment.has_valid_range());
        assert!(!enrollment.is_in_effect(date("2024-09-15")));
        assert!(!enrollment.is_in_effect(date("2024-10-02")));
    }

    #[test]
    fn test_inactive_without_end_date_never_in_effect() {
        let enrollment = create_test_enrollment(None, false);
        assert!(!enrollment.is_in_effect(date("2024-10-07")));
    }

    #[test]
    fn test_scheduled_requires_weekday() {
        let enrollment = create_test_enrollment(None, true);
        // Thursday / Friday
        assert!(enrollment.is_scheduled(date("2024-10-03")));
        assert!(!enrollment.is_scheduled(date("2024-10-04")));
    }
}
