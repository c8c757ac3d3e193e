//! Duty record and list page

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single duty row from the `duties` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Duty {
    pub id: Uuid,
    pub name: String,
}

impl Duty {
    /// Builds a new duty with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// One page of duties plus the number of rows in the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyPage {
    pub duties: Vec<Duty>,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_duty_gets_distinct_ids() {
        let a = Duty::new("Wash dishes");
        let b = Duty::new("Wash dishes");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Wash dishes");
    }

    #[test]
    fn test_duty_serializes_id_as_string() {
        let duty = Duty::new("Laundry");
        let json = serde_json::to_value(&duty).unwrap();
        assert_eq!(json["id"], duty.id.to_string());
        assert_eq!(json["name"], "Laundry");
    }

    #[test]
    fn test_page_uses_total_count_field() {
        let page = DutyPage {
            duties: vec![Duty::new("Cook")],
            total_count: 1,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["duties"].as_array().unwrap().len(), 1);
    }
}
