//! Core data models for the billing engine.
//!
//! This module contains the source records read from storage and the result
//! types produced by a billing run.

mod attendance;
mod billing_result;
mod date;
mod enrollment;
mod holiday;
mod person;
mod report;
mod snapshot;

pub use attendance::{Absence, Invitation, OneTimeRequest, RequestStatus};
pub use billing_result::{
    BillingWarning, DayCategory, DayClassification, DayLine, DiscountResolution, MonthAggregate,
    MonthlyBilling,
};
pub use date::{CalendarDate, ISO_DATE_FORMAT, LOCALIZED_DATE_FORMAT};
pub use enrollment::{Enrollment, SchoolDay};
pub use holiday::Holiday;
pub use person::{Person, PersonKind};
pub use report::{BillingGroup, BillingReport, BillingReportRow, GroupTotal, PersonBillingError};
pub use snapshot::{BillingSnapshot, PersonRecords};
