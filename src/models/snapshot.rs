//! The read-only data a billing run works from.

use serde::{Deserialize, Serialize};

use super::{Absence, Enrollment, Holiday, Invitation, OneTimeRequest, Person};

/// Everything fetched once from storage for a billing run.
///
/// The engine never reads storage itself; the caller fills this snapshot and
/// hands it over immutably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSnapshot {
    /// People to bill.
    pub people: Vec<Person>,
    /// Active and historical enrollments.
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    /// Reported absences.
    #[serde(default)]
    pub absences: Vec<Absence>,
    /// One-time requests in any status.
    #[serde(default)]
    pub one_time_requests: Vec<OneTimeRequest>,
    /// Invitations, including guest invitations.
    #[serde(default)]
    pub invitations: Vec<Invitation>,
    /// Calendar-wide holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// A person's share of a [`BillingSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct PersonRecords<'a> {
    /// The person's enrollments.
    pub enrollments: Vec<&'a Enrollment>,
    /// The person's absences.
    pub absences: Vec<&'a Absence>,
    /// The person's one-time requests.
    pub one_time_requests: Vec<&'a OneTimeRequest>,
    /// Invitations addressed to the person.
    pub invitations: Vec<&'a Invitation>,
}

impl BillingSnapshot {
    /// Collects the records belonging to `person_id`.
    pub fn records_for(&self, person_id: &str) -> PersonRecords<'_> {
        PersonRecords {
            enrollments: self
                .enrollments
                .iter()
                .filter(|e| e.person_id == person_id)
                .collect(),
            absences: self
                .absences
                .iter()
                .filter(|a| a.person_id == person_id)
                .collect(),
            one_time_requests: self
                .one_time_requests
                .iter()
                .filter(|r| r.person_id == person_id)
                .collect(),
            invitations: self
                .invitations
                .iter()
                .filter(|i| i.is_for(person_id))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_snapshot() {
        let json = r#"{ "people": [ { "id": "alu_001", "name": "Ana", "kind": "child" } ] }"#;
        let snapshot: BillingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.people.len(), 1);
        assert!(snapshot.enrollments.is_empty());
        assert!(snapshot.holidays.is_empty());
    }

    #[test]
    fn test_records_for_filters_by_person() {
        let json = r#"{
            "people": [],
            "absences": [
                { "id": "b1", "person_id": "alu_001", "dates": ["2024-10-08"] },
                { "id": "b2", "person_id": "alu_002", "dates": ["2024-10-08"] }
            ],
            "invitations": [
                { "id": "i1", "person_id": "alu_001", "date": "2024-10-09" },
                { "id": "i2", "guest_name": "Visita", "date": "2024-10-09" }
            ]
        }"#;
        let snapshot: BillingSnapshot = serde_json::from_str(json).unwrap();

        let records = snapshot.records_for("alu_001");
        assert_eq!(records.absences.len(), 1);
        assert_eq!(records.absences[0].id, "b1");
        assert_eq!(records.invitations.len(), 1);
        assert!(records.enrollments.is_empty());
    }
}
