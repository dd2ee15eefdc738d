//! Infrastructure Resource Model

use super::{Deactivatable, Record, StatefulRecord};
use crate::lifecycle::ResourceState;
use serde::{Deserialize, Serialize};

/// Schedulable resource (bed, OT table, dialysis station, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub branch_id: String,
    pub unit_id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub asset_tag: Option<String>,
    /// Free-form resource type code, e.g. `ICU_BED`
    pub resource_type: String,
    #[serde(default)]
    pub resource_category: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    pub current_state: ResourceState,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_schedulable: bool,
    #[serde(default)]
    pub slot_duration_minutes: Option<u32>,
    #[serde(default)]
    pub next_maintenance_date: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub reserved_reason: Option<String>,
    #[serde(default)]
    pub blocked_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Resource {
    /// Reason recorded for the current state, if the state carries one
    pub fn state_reason(&self) -> Option<&str> {
        match self.current_state {
            ResourceState::Reserved => self.reserved_reason.as_deref(),
            ResourceState::Blocked => self.blocked_reason.as_deref(),
            _ => None,
        }
    }
}

impl Record for Resource {
    fn id(&self) -> &str {
        &self.id
    }
}

impl StatefulRecord for Resource {
    type Status = ResourceState;

    fn status(&self) -> ResourceState {
        self.current_state
    }

    fn set_status(&mut self, status: ResourceState) {
        self.current_state = status;
        self.is_available = status.is_bookable();
        if status == ResourceState::Inactive {
            self.is_active = false;
        }
    }
}

impl Deactivatable for Resource {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn mark_inactive(&mut self) {
        self.set_status(ResourceState::Inactive);
    }
}

/// Partial edit payload: `PATCH /api/infrastructure/resources/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_schedulable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<String>,
    /// `Some(true)` reactivates a deactivated resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `POST .../{id}/state`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStateChange {
    pub state: ResourceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Soft deactivation body shared by resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deactivation {
    pub reason: String,
    pub hard: bool,
}

impl Deactivation {
    pub fn soft(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            hard: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ResourceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Resource {
        serde_json::from_value(json!({
            "id": "res-1",
            "branchId": "b-1",
            "unitId": "u-1",
            "code": "ICU-01",
            "name": "ICU Bed 1",
            "resourceType": "ICU_BED",
            "currentState": "AVAILABLE",
            "isAvailable": true,
            "isActive": true,
            "blockedReason": "Leaking oxygen valve"
        }))
        .unwrap()
    }

    #[test]
    fn test_state_change_body() {
        let body = ResourceStateChange {
            state: ResourceState::Maintenance,
            reason: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "state": "MAINTENANCE" })
        );
    }

    #[test]
    fn test_soft_deactivation_body() {
        assert_eq!(
            serde_json::to_value(Deactivation::soft("Decommissioned")).unwrap(),
            json!({ "reason": "Decommissioned", "hard": false })
        );
    }

    #[test]
    fn test_set_status_updates_derived_flags() {
        let mut resource = sample();
        resource.set_status(ResourceState::Blocked);
        assert_eq!(resource.status(), ResourceState::Blocked);
        assert!(!resource.is_available);
        assert!(resource.is_active);
        assert_eq!(resource.state_reason(), Some("Leaking oxygen valve"));

        resource.set_status(ResourceState::Inactive);
        assert!(!resource.is_active);
        assert_eq!(resource.state_reason(), None);
    }

    #[test]
    fn test_mark_inactive() {
        let mut resource = sample();
        assert!(Deactivatable::is_active(&resource));
        resource.mark_inactive();
        assert_eq!(resource.current_state, ResourceState::Inactive);
        assert!(!Deactivatable::is_active(&resource));
        assert!(!resource.is_available);
    }
}
