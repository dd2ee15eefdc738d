//! Unit Model

use super::{Deactivatable, Record};
use serde::{Deserialize, Serialize};

/// Unit entity (ward, ICU, OT complex, ...), scoped to a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub branch_id: String,
    pub department_id: String,
    pub unit_type_id: String,
    #[serde(default)]
    pub location_node_id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub uses_rooms: bool,
    pub is_active: bool,
    #[serde(default)]
    pub total_room_count: Option<u32>,
    #[serde(default)]
    pub total_bed_capacity: Option<u32>,
    #[serde(default)]
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub wing_zone: Option<String>,
    #[serde(default)]
    pub nursing_station: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record for Unit {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Deactivatable for Unit {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn mark_inactive(&mut self) {
        self.is_active = false;
    }
}

/// Create unit payload: `POST /api/infrastructure/units?branchId=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCreate {
    pub department_id: String,
    pub unit_type_id: String,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_room_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bed_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commissioning_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incharge_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nursing_station: Option<String>,
}

/// Update unit payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_room_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bed_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nursing_station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query string for `DELETE /api/infrastructure/units/{id}` (soft deactivate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDeactivation {
    pub hard: bool,
    pub cascade: bool,
    pub reason: String,
}

impl UnitDeactivation {
    pub fn soft(reason: impl Into<String>) -> Self {
        Self {
            hard: false,
            cascade: true,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitFilter {
    pub branch_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_node_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_soft_deactivation_defaults() {
        let d = UnitDeactivation::soft("Merged into ICU-2");
        assert!(!d.hard);
        assert!(d.cascade);
        assert_eq!(d.reason, "Merged into ICU-2");
    }

    #[test]
    fn test_create_skips_optional() {
        let payload = UnitCreate {
            department_id: "d-1".into(),
            unit_type_id: "ut-1".into(),
            code: "ICU-1".into(),
            name: "Medical ICU".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "departmentId": "d-1",
                "unitTypeId": "ut-1",
                "code": "ICU-1",
                "name": "Medical ICU"
            })
        );
    }
}
