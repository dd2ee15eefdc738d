//! Pre-authorization Model

use super::{PatientRef, PayerRef, Record, StatefulRecord};
use crate::lifecycle::PreauthStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who raised a pre-authorization query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuerySource {
    #[default]
    Tpa,
    Insurer,
    Hospital,
}

impl std::str::FromStr for QuerySource {
    type Err = crate::lifecycle::UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TPA" => Ok(Self::Tpa),
            "INSURER" => Ok(Self::Insurer),
            "HOSPITAL" => Ok(Self::Hospital),
            _ => Err(crate::lifecycle::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthCaseRef {
    pub case_number: String,
    #[serde(default)]
    pub patient: Option<PatientRef>,
    #[serde(default)]
    pub payer: Option<PayerRef>,
}

/// Query raised against a pre-authorization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthQuery {
    pub id: String,
    pub query_text: String,
    pub query_source: QuerySource,
    pub queried_at: String,
    #[serde(default)]
    pub response_text: Option<String>,
    #[serde(default)]
    pub responded_at: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub attachment_urls: Vec<String>,
}

/// Pre-authorization request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthRequest {
    pub id: String,
    pub branch_id: String,
    pub insurance_case_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_case: Option<PreauthCaseRef>,
    pub request_number: String,
    #[serde(default)]
    pub version: u32,
    pub status: PreauthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub requested_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub approved_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub enhancement_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<PreauthQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Record for PreauthRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl StatefulRecord for PreauthRequest {
    type Status = PreauthStatus;

    fn status(&self) -> PreauthStatus {
        self.status
    }

    fn set_status(&mut self, status: PreauthStatus) {
        self.status = status;
    }
}

/// Create pre-authorization payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthCreate {
    pub insurance_case_id: String,
    pub request_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub requested_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis_description: Option<String>,
}

/// `POST .../{id}/approve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthApprove {
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<String>,
}

/// `POST .../{id}/reject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthReject {
    pub rejection_reason: String,
}

/// `POST .../{id}/queries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthQueryCreate {
    pub query_text: String,
    pub query_source: QuerySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PreauthStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_case_id: Option<String>,
}

/// Dashboard counters over the loaded rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreauthStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub enhancement_pending: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_requested: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_approved: Decimal,
}

impl PreauthStats {
    pub fn from_rows(rows: &[PreauthRequest]) -> Self {
        let mut stats = Self {
            total: rows.len(),
            ..Self::default()
        };
        for row in rows {
            if row.status.is_pending() {
                stats.pending += 1;
            }
            if row.status.is_approved() {
                stats.approved += 1;
            }
            match row.status {
                PreauthStatus::Rejected => stats.rejected += 1,
                PreauthStatus::EnhancementRequested => stats.enhancement_pending += 1,
                _ => {}
            }
            stats.total_requested += row.requested_amount.unwrap_or_default();
            stats.total_approved += row.approved_amount.unwrap_or_default();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reject_body() {
        let body = PreauthReject {
            rejection_reason: "Missing documents".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "rejectionReason": "Missing documents" })
        );
    }

    #[test]
    fn test_approve_body_omits_blank_validity() {
        let body = PreauthApprove {
            approved_amount: Decimal::new(50000, 0),
            valid_till: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "approvedAmount": 50000.0 })
        );
    }

    #[test]
    fn test_query_source_wire() {
        let body = PreauthQueryCreate {
            query_text: "Send discharge summary".into(),
            query_source: QuerySource::Insurer,
            deadline: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "queryText": "Send discharge summary", "querySource": "INSURER" })
        );
        assert_eq!("tpa".parse::<QuerySource>(), Ok(QuerySource::Tpa));
    }

    #[test]
    fn test_stats() {
        let rows: Vec<PreauthRequest> = ["PREAUTH_SUBMITTED", "PREAUTH_APPROVED", "PREAUTH_REJECTED"]
            .iter()
            .enumerate()
            .map(|(i, status)| {
                serde_json::from_value(json!({
                    "id": format!("pa-{i}"),
                    "branchId": "b-1",
                    "insuranceCaseId": "case-1",
                    "requestNumber": format!("PA-{i}"),
                    "status": status,
                    "requestedAmount": 100
                }))
                .unwrap()
            })
            .collect();
        let stats = PreauthStats::from_rows(&rows);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total_requested, Decimal::new(300, 0));
    }
}
