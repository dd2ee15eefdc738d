//! Governance Policy Model

use super::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Governance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Record for Policy {
    fn id(&self) -> &str {
        &self.id
    }
}

/// `POST /api/governance/policies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCreate {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response of `POST /api/governance/policies/{code}/drafts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDraft {
    pub id: String,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// `GET /api/governance/policies/{code}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDetail {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Open draft version, if any
    #[serde(default)]
    pub draft: Option<PolicyDraft>,
}

/// `PATCH /api/governance/policy-versions/{draftId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVersionUpdate {
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_at: Option<String>,
    pub apply_to_all_branches: bool,
    pub branch_ids: Vec<String>,
}

impl PolicyVersionUpdate {
    /// Version applying to every branch
    pub fn all_branches(payload: Value) -> Self {
        Self {
            payload,
            notes: None,
            effective_at: None,
            apply_to_all_branches: true,
            branch_ids: Vec::new(),
        }
    }
}
