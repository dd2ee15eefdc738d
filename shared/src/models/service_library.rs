//! Service Library Model (standard code sets and mappings)

use super::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard code set (e.g. LOINC, SNOMED subset, local tariff codes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSet {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record for CodeSet {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSetUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Entry of a code set; addressed by its code within the set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSetEntry {
    pub id: String,
    pub code_set_id: String,
    pub code: String,
    pub display: String,
    #[serde(default)]
    pub attributes: Option<Value>,
    pub is_active: bool,
}

impl Record for CodeSetEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// `POST .../code-sets/{id}/entries`: inserts or updates by code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSetEntryUpsert {
    pub code: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedEntry {
    pub id: String,
    pub code: String,
    pub display: String,
    #[serde(default)]
    pub code_set: Option<CodeSet>,
}

/// Link from a service item to a standard code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMapping {
    pub id: String,
    pub branch_id: String,
    pub service_item_id: String,
    pub entry_id: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub entry: Option<MappedEntry>,
}

impl Record for CodeMapping {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMappingCreate {
    pub service_item_id: String,
    pub entry_id: String,
    pub is_primary: bool,
}

/// Query for code sets, entries and mappings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_set_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_active_body() {
        let body = CodeSetUpsert {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "isActive": false }));
    }

    #[test]
    fn test_mapping_row() {
        let m: CodeMapping = serde_json::from_value(json!({
            "id": "m-1",
            "branchId": "b-1",
            "serviceItemId": "svc-1",
            "entryId": "e-1",
            "isPrimary": true,
            "entry": { "id": "e-1", "code": "85025", "display": "CBC" }
        }))
        .unwrap();
        assert!(m.is_primary);
        assert_eq!(m.entry.unwrap().code, "85025");
    }
}
