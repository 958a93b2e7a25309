//! People served by the cafeteria.

use serde::{Deserialize, Serialize};

/// Whether a person is billed as a pupil or as a member of staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    /// A pupil, billed to their family.
    Child,
    /// A teacher or other staff member, billed individually.
    Staff,
}

/// A person who can be enrolled for meal service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person.
    pub id: String,
    /// Display name used on the billing report.
    pub name: String,
    /// Child or staff.
    pub kind: PersonKind,
    /// Family the child belongs to, used for the multi-child discount.
    #[serde(default)]
    pub family_id: Option<String>,
}

impl Person {
    /// Returns true for staff members.
    pub fn is_staff(&self) -> bool {
        self.kind == PersonKind::Staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_child_with_family() {
        let json = r#"{
            "id": "alu_001",
            "name": "Lucía Martín",
            "kind": "child",
            "family_id": "fam_martin"
        }"#;

        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.kind, PersonKind::Child);
        assert_eq!(person.family_id.as_deref(), Some("fam_martin"));
        assert!(!person.is_staff());
    }

    #[test]
    fn test_deserialize_staff_without_family() {
        let json = r#"{ "id": "doc_001", "name": "Pedro Gil", "kind": "staff" }"#;

        let person: Person = serde_json::from_str(json).unwrap();
        assert!(person.is_staff());
        assert!(person.family_id.is_none());
    }
}
