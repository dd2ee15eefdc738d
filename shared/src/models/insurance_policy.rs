//! Insurance Policy Model

use super::{PatientRef, PayerRef, Record};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Insurance policy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
    Suspended,
    Lapsed,
}

/// Relationship of the patient to the primary insured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    #[default]
    #[serde(rename = "SELF")]
    SelfInsured,
    Spouse,
    Child,
    Parent,
    Other,
}

/// Insurance policy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub id: String,
    pub branch_id: String,
    pub patient_id: String,
    #[serde(default)]
    pub patient: Option<PatientRef>,
    pub payer_id: String,
    #[serde(default)]
    pub payer: Option<PayerRef>,
    #[serde(default)]
    pub contract_id: Option<String>,
    pub policy_number: String,
    pub member_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub relationship: Relationship,
    pub status: PolicyStatus,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sum_insured: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_remaining: Option<Decimal>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub verified_by_user_id: Option<String>,
}

impl InsurancePolicy {
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

impl Record for InsurancePolicy {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create / full-edit insurance policy payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicyUpsert {
    pub branch_id: String,
    pub patient_id: String,
    pub payer_id: String,
    pub policy_number: String,
    pub member_id: String,
    pub relationship: Relationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub sum_insured: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub balance_remaining: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PolicyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
}
