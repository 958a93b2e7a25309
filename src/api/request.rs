//! Request types for the billing API.
//!
//! This module defines the JSON request structure for the
//! `/billing/monthly` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::BillingSnapshot;

/// Request body for the `/billing/monthly` endpoint.
///
/// The month to bill plus the data snapshot for it. Snapshot fields sit at
/// the top level of the body next to `year` and `month`:
///
/// ```json
/// {
///   "year": 2024,
///   "month": 10,
///   "people": [{ "id": "alu_001", "name": "Ana", "kind": "child" }],
///   "enrollments": [],
///   "absences": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBillingRequest {
    /// Billing year.
    pub year: i32,
    /// Billing month (1-12).
    pub month: u32,
    /// People and their records.
    #[serde(flatten)]
    pub snapshot: BillingSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flattened_snapshot() {
        let json = r#"{
            "year": 2024,
            "month": 10,
            "people": [{ "id": "alu_001", "name": "Ana", "kind": "child" }],
            "enrollments": [{
                "id": "ins_001",
                "person_id": "alu_001",
                "weekdays": ["monday", "thu"],
                "daily_price": "5.50",
                "start_date": "09/09/2024"
            }]
        }"#;

        let request: MonthlyBillingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.year, 2024);
        assert_eq!(request.month, 10);
        assert_eq!(request.snapshot.people.len(), 1);
        assert_eq!(request.snapshot.enrollments.len(), 1);
        assert!(request.snapshot.enrollments[0].active);
        assert!(request.snapshot.absences.is_empty());
    }

    #[test]
    fn test_missing_month_is_rejected() {
        let json = r#"{ "year": 2024, "people": [] }"#;
        let result: Result<MonthlyBillingRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
