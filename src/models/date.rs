//! Calendar date value type and the two accepted textual encodings.
//!
//! Source tables store some dates as ISO strings (`2024-10-07`) and others as
//! localized display strings (`07/10/2024`). Every date is converted to a
//! [`CalendarDate`] at the ingestion boundary; raw strings are never compared.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// ISO 8601 calendar date encoding.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Localized day-first encoding used by the absence forms.
pub const LOCALIZED_DATE_FORMAT: &str = "%d/%m/%Y";

/// A calendar date with no time or timezone component.
///
/// Serializes as ISO `YYYY-MM-DD`; deserializes from either ISO or
/// `DD/MM/YYYY`.
///
/// # Example
///
/// ```
/// use comedor_billing::models::CalendarDate;
///
/// let iso = CalendarDate::parse("2024-10-08").unwrap();
/// let localized = CalendarDate::parse("08/10/2024").unwrap();
/// assert_eq!(iso, localized);
/// assert_eq!(iso.to_string(), "2024-10-08");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from its components, `None` when it does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses either supported encoding.
    ///
    /// Surrounding whitespace is ignored, and an ISO timestamp such as
    /// `2024-10-08T00:00:00` is reduced to its date part. Years must have four
    /// digits so that `08/10/24` is rejected instead of read as year 24.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let candidate = match trimmed.split_once('T') {
            Some((date, _)) if date.len() == 10 => date,
            _ => trimmed,
        };

        NaiveDate::parse_from_str(candidate, ISO_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(candidate, LOCALIZED_DATE_FORMAT))
            .ok()
            .filter(|date| date.year() >= 1000)
            .map(Self)
    }

    /// Parses a date read from `record_id`, reporting unreadable text as
    /// [`EngineError::AmbiguousDateEncoding`].
    pub fn normalize(raw: &str, record_id: &str) -> EngineResult<Self> {
        Self::parse(raw).ok_or_else(|| EngineError::AmbiguousDateEncoding {
            record_id: record_id.to_string(),
            value: raw.to_string(),
        })
    }

    /// Returns the underlying chrono date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s, "<inline>")
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDate::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}': expected YYYY-MM-DD or DD/MM/YYYY",
                raw
            ))
        })
    }
}
