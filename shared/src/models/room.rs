//! Room Model

use super::{Deactivatable, Record};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room entity (ward room, ICU cubicle, OT suite room, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub branch_id: String,
    pub unit_id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub max_occupancy: Option<u32>,
    #[serde(default)]
    pub current_occupancy: Option<u32>,
    #[serde(default)]
    pub pricing_tier: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub base_charge_per_day: Option<Decimal>,
    #[serde(default)]
    pub is_isolation: bool,
    pub is_active: bool,
    #[serde(default)]
    pub deactivation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record for Room {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Deactivatable for Room {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn mark_inactive(&mut self) {
        self.is_active = false;
    }
}

/// Create room payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub unit_id: String,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub base_charge_per_day: Option<Decimal>,
}

/// Update room payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub base_charge_per_day: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `POST /api/infrastructure/rooms/{id}/deactivate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDeactivation {
    pub reason: String,
    /// Also deactivate the room's resources
    pub cascade: bool,
    pub hard: bool,
}

impl RoomDeactivation {
    pub fn soft(reason: impl Into<String>, cascade: bool) -> Self {
        Self {
            reason: reason.into(),
            cascade,
            hard: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
}
