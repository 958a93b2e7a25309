//! Per-day attendance records: absences, one-time requests and invitations.
//!
//! Absence and invitation dates are kept as the raw text found in the source
//! tables and normalized with [`CalendarDate::normalize`] when a person's
//! month is billed, so that an unreadable date fails only that person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CalendarDate;
use crate::error::EngineResult;

/// A reported non-attendance ("baja") on one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Unique identifier for the absence report.
    pub id: String,
    /// The absent person.
    pub person_id: String,
    /// Raw dates, in ISO or `DD/MM/YYYY` form.
    pub dates: Vec<String>,
    /// Free-text reason given by the family.
    #[serde(default)]
    pub reason: String,
    /// When the absence was reported.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Absence {
    /// Normalizes every reported date.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousDateEncoding` for the first date that cannot be read.
    pub fn calendar_dates(&self) -> EngineResult<Vec<CalendarDate>> {
        self.dates
            .iter()
            .map(|raw| CalendarDate::normalize(raw, &self.id))
            .collect()
    }
}

/// Review status of a one-time meal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting review.
    Pending,
    /// Accepted; the day is served and billed.
    Approved,
    /// Declined.
    Rejected,
}

/// An ad-hoc meal request ("solicitud puntual") for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting person.
    pub person_id: String,
    /// The requested day.
    pub date: CalendarDate,
    /// Review status.
    pub status: RequestStatus,
}

impl OneTimeRequest {
    /// Only approved requests are served.
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}

/// An administrator-granted free meal.
///
/// Invitations addressed to an external guest carry only `guest_name` and
/// never match an enrolled person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier for the invitation.
    pub id: String,
    /// The invited person, if they are on the roll.
    #[serde(default)]
    pub person_id: Option<String>,
    /// Name of an external guest.
    #[serde(default)]
    pub guest_name: Option<String>,
    /// Raw date, in ISO or `DD/MM/YYYY` form.
    pub date: String,
    /// Why the meal is offered.
    #[serde(default)]
    pub reason: String,
}

impl Invitation {
    /// Returns true if the invitation is addressed to `person_id`.
    pub fn is_for(&self, person_id: &str) -> bool {
        self.person_id.as_deref() == Some(person_id)
    }

    /// Normalizes the invitation date.
    pub fn calendar_date(&self) -> EngineResult<CalendarDate> {
        CalendarDate::normalize(&self.date, &self.id)
    }
}
