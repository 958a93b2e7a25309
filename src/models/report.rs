//! Billing report models handed to export and UI collaborators.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MonthlyBilling, PersonKind};

/// Who a report row is charged to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BillingGroup {
    /// Children sharing a family id. A child without one is its own family.
    Family {
        /// The family identifier.
        family_id: String,
    },
    /// All staff members.
    Staff,
}

/// One line item of the monthly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingReportRow {
    /// The billed person.
    pub person_id: String,
    /// Display name.
    pub person_name: String,
    /// Child or staff.
    pub kind: PersonKind,
    /// Group the row is totalled into.
    pub group: BillingGroup,
    /// Days charged.
    pub billable_days: u32,
    /// Reference daily price for the month.
    pub daily_price: Decimal,
    /// Effective discount percentage.
    pub discount_pct: Decimal,
    /// Charge before discount.
    pub subtotal: Decimal,
    /// Charge after discount.
    pub final_total: Decimal,
    /// Full breakdown behind the row.
    pub detail: MonthlyBilling,
}

/// Total of one family or of the staff group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// The group.
    pub group: BillingGroup,
    /// Number of successfully billed members.
    pub members: u32,
    /// Sum of member subtotals.
    pub subtotal: Decimal,
    /// Sum of member final totals.
    pub final_total: Decimal,
}

/// A person whose month could not be billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonBillingError {
    /// The affected person.
    pub person_id: String,
    /// Display name.
    pub person_name: String,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable explanation for the operator.
    pub message: String,
}

/// The complete result of a monthly billing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingReport {
    /// Unique identifier for this run.
    pub report_id: Uuid,
    /// When the run was performed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// Billing year.
    pub year: i32,
    /// Billing month (1-12).
    pub month: u32,
    /// Business days in the month, shared by every row.
    pub total_business_days: u32,
    /// Identifier of the discount configuration snapshot used.
    pub discount_config_id: String,
    /// Successfully billed people, ordered by name.
    pub rows: Vec<BillingReportRow>,
    /// Per-family and staff totals.
    pub group_totals: Vec<GroupTotal>,
    /// People that could not be billed.
    pub errors: Vec<PersonBillingError>,
    /// Sum of all row final totals.
    pub grand_total: Decimal,
    /// The run duration in microseconds.
    pub duration_us: u64,
}

impl BillingReport {
    /// Returns true when every person was billed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}
