//! Normalized per-person day sets.
//!
//! Absence, request and invitation records are reduced to sets of
//! [`CalendarDate`] once per person, so that the classifier compares dates
//! and never raw strings.

use std::collections::BTreeSet;

use crate::error::EngineResult;
use crate::models::{Absence, CalendarDate, Invitation, OneTimeRequest};

use super::classifier::DayFacts;

/// The days on which each per-person source applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSources {
    absences: BTreeSet<CalendarDate>,
    approved_requests: BTreeSet<CalendarDate>,
    invitations: BTreeSet<CalendarDate>,
}

impl PersonSources {
    /// Normalizes a person's records.
    ///
    /// Records must already belong to the person. The dates of multiple
    /// absence records are unioned; only approved requests are kept.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousDateEncoding` for the first absence or invitation
    /// date that is neither ISO nor `DD/MM/YYYY`.
    pub fn collect<'a>(
        absences: impl IntoIterator<Item = &'a Absence>,
        one_time_requests: impl IntoIterator<Item = &'a OneTimeRequest>,
        invitations: impl IntoIterator<Item = &'a Invitation>,
    ) -> EngineResult<Self> {
        let mut sources = Self::default();

        for absence in absences {
            sources.absences.extend(absence.calendar_dates()?);
        }

        sources.approved_requests = one_time_requests
            .into_iter()
            .filter(|r| r.is_approved())
            .map(|r| r.date)
            .collect();

        for invitation in invitations {
            sources.invitations.insert(invitation.calendar_date()?);
        }

        Ok(sources)
    }

    /// Adds an absence day.
    pub fn with_absence(mut self, date: CalendarDate) -> Self {
        self.absences.insert(date);
        self
    }

    /// Looks up every source for one day.
    pub fn facts_for(&self, date: CalendarDate, holidays: &BTreeSet<CalendarDate>) -> DayFacts {
        DayFacts {
            invited: self.invitations.contains(&date),
            holiday: holidays.contains(&date),
            absent: self.absences.contains(&date),
            approved_request: self.approved_requests.contains(&date),
        }
    }
}
