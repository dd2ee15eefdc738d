//! Insurance Case Model

use super::{PatientRef, PayerRef, Record, StatefulRecord};
use crate::lifecycle::CaseStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Case type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseType {
    Cashless,
    Reimbursement,
    Package,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cashless => "CASHLESS",
            Self::Reimbursement => "REIMBURSEMENT",
            Self::Package => "PACKAGE",
        }
    }
}

impl std::str::FromStr for CaseType {
    type Err = crate::lifecycle::UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASHLESS" => Ok(Self::Cashless),
            "REIMBURSEMENT" => Ok(Self::Reimbursement),
            "PACKAGE" => Ok(Self::Package),
            other => Err(crate::lifecycle::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePolicyRef {
    pub policy_number: String,
    pub member_id: String,
}

/// Insurance case entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceCase {
    pub id: String,
    pub branch_id: String,
    pub case_number: String,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
    pub encounter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub policy_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<CasePolicyRef>,
    pub payer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<PayerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub case_type: CaseType,
    pub status: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treating_doctor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub estimated_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub approved_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub claimed_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub settled_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Record for InsuranceCase {
    fn id(&self) -> &str {
        &self.id
    }
}

impl StatefulRecord for InsuranceCase {
    type Status = CaseStatus;

    fn status(&self) -> CaseStatus {
        self.status
    }

    fn set_status(&mut self, status: CaseStatus) {
        self.status = status;
    }
}

/// Create insurance case payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceCaseCreate {
    pub case_number: String,
    pub patient_id: String,
    pub encounter_id: String,
    pub policy_id: String,
    pub payer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<CaseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treating_doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub procedures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub estimated_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Status transition payload: `POST .../{id}/transition`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseTransitionRequest {
    pub target_status: CaseStatus,
}

/// List filter; `None` values are left out of the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<CaseType>,
}

/// Dashboard counters over the loaded rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStats {
    pub total: usize,
    pub open: usize,
    pub preauth_pending: usize,
    pub claim_pending: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_approved: Decimal,
}

impl CaseStats {
    pub fn from_rows(rows: &[InsuranceCase]) -> Self {
        rows.iter().fold(
            Self {
                total: rows.len(),
                ..Self::default()
            },
            |mut acc, row| {
                if row.status.is_open() {
                    acc.open += 1;
                }
                match row.status {
                    CaseStatus::PreauthPending => acc.preauth_pending += 1,
                    CaseStatus::ClaimSubmitted => acc.claim_pending += 1,
                    _ => {}
                }
                acc.total_approved += row.approved_amount.unwrap_or_default();
                acc
            },
        )
    }
}
