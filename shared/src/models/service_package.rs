//! Service Package Model

use super::{Record, StatefulRecord};
use crate::lifecycle::PackageStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    ServiceItem,
    DiagnosticItem,
    ChargeMasterItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemRef {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Line item of a service package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageComponent {
    pub id: String,
    pub package_id: String,
    pub component_type: ComponentType,
    #[serde(default)]
    pub service_item_id: Option<String>,
    #[serde(default)]
    pub service_item: Option<ServiceItemRef>,
    pub quantity: u32,
    pub is_included: bool,
    /// Free-form rules object, opaque to the client
    #[serde(default)]
    pub condition: Option<Value>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Service package entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    pub id: String,
    pub branch_id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: PackageStatus,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub effective_from: Option<String>,
    #[serde(default)]
    pub effective_to: Option<String>,
    #[serde(default)]
    pub components: Vec<PackageComponent>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ServicePackage {
    /// Components not soft-removed
    pub fn active_components(&self) -> impl Iterator<Item = &PackageComponent> {
        self.components.iter().filter(|c| c.is_active)
    }
}

impl Record for ServicePackage {
    fn id(&self) -> &str {
        &self.id
    }
}

impl StatefulRecord for ServicePackage {
    type Status = PackageStatus;

    fn status(&self) -> PackageStatus {
        self.status
    }

    fn set_status(&mut self, status: PackageStatus) {
        self.status = status;
    }
}

/// Create / edit package payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackageUpsert {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `POST .../{id}/components`: inserts or updates by service item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageComponentUpsert {
    pub service_item_id: String,
    /// At least 1
    pub quantity: u32,
    pub is_included: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
}

impl PackageComponentUpsert {
    pub fn new(service_item_id: impl Into<String>, quantity: u32, is_included: bool) -> Self {
        Self {
            service_item_id: service_item_id.into(),
            quantity: quantity.max(1),
            is_included,
            rules: None,
        }
    }

    pub fn with_rules(mut self, rules: Option<Value>) -> Self {
        self.rules = rules;
        self
    }
}

/// `POST .../{id}/workflow/{action}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// List filter for `GET /api/infrastructure/service-packages`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageFilter {
    pub branch_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    /// Applied locally; the list endpoint always returns retired packages
    #[serde(skip)]
    pub include_retired: bool,
}

impl PackageFilter {
    pub fn for_branch(branch_id: impl Into<String>) -> Self {
        Self {
            branch_id: branch_id.into(),
            ..Self::default()
        }
    }

    /// Drop retired packages unless asked to keep them
    pub fn visible(&self, rows: Vec<ServicePackage>) -> Vec<ServicePackage> {
        if self.include_retired {
            return rows;
        }
        rows.into_iter()
            .filter(|p| p.status != PackageStatus::Retired)
            .collect()
    }
}
