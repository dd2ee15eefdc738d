//! Policy Templates and Packs
//!
//! A template fixes a policy's code, type and the shape of its version
//! payload. The editable values are typed per template and the payload is
//! built from them. A pack bundles templates with preset values.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::lifecycle::UnknownStatus;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Built-in policy template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyTemplate {
    RetentionClinicalRecords,
    ConsentDefaults,
    AuditLogging,
    ExportGuardrails,
    BreakGlass,
}

impl PolicyTemplate {
    pub const ALL: [PolicyTemplate; 5] = [
        Self::RetentionClinicalRecords,
        Self::ConsentDefaults,
        Self::AuditLogging,
        Self::ExportGuardrails,
        Self::BreakGlass,
    ];

    /// Template id, also the policy code it creates
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RetentionClinicalRecords => "RETENTION_CLINICAL_RECORDS",
            Self::ConsentDefaults => "CONSENT_DEFAULTS",
            Self::AuditLogging => "AUDIT_LOGGING",
            Self::ExportGuardrails => "EXPORT_GUARDRAILS",
            Self::BreakGlass => "BREAK_GLASS",
        }
    }

    pub fn code(&self) -> &'static str {
        self.as_str()
    }

    /// `type` of the policy definition
    pub fn policy_type(&self) -> &'static str {
        match self {
            Self::RetentionClinicalRecords => "RETENTION",
            Self::ConsentDefaults => "CONSENT_DEFAULTS",
            Self::AuditLogging => "AUDIT",
            Self::ExportGuardrails => "EXPORTS",
            Self::BreakGlass => "BREAK_GLASS",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RetentionClinicalRecords => "Clinical Records Retention",
            Self::ConsentDefaults => "Consent Defaults",
            Self::AuditLogging => "Audit Logging",
            Self::ExportGuardrails => "Export Guardrails",
            Self::BreakGlass => "Break-Glass Controls",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::RetentionClinicalRecords | Self::AuditLogging => "Governance",
            Self::ConsentDefaults | Self::ExportGuardrails => "Data & Privacy",
            Self::BreakGlass => "Access Control",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::RetentionClinicalRecords => {
                "Retention periods for OPD/IPD/lab/imaging records with a medico-legal hold."
            }
            Self::ConsentDefaults => {
                "Default consent posture for disclosures and patient-facing sharing."
            }
            Self::AuditLogging => "Audit ledger granularity and retention for sensitive operations.",
            Self::ExportGuardrails => {
                "Controls for CSV/Excel exports including thresholds and justification requirements."
            }
            Self::BreakGlass => {
                "Emergency access policy with mandatory justification and elevated logging."
            }
        }
    }

    pub fn defaults(&self) -> TemplateValues {
        match self {
            Self::RetentionClinicalRecords => TemplateValues::Retention(RetentionValues::default()),
            Self::ConsentDefaults => TemplateValues::Consent(ConsentValues::default()),
            Self::AuditLogging => TemplateValues::Audit(AuditValues::default()),
            Self::ExportGuardrails => TemplateValues::Export(ExportValues::default()),
            Self::BreakGlass => TemplateValues::BreakGlass(BreakGlassValues::default()),
        }
    }

    /// Editable values read back from a stored payload. Missing or
    /// malformed numbers fall back to the template defaults.
    pub fn values_from_payload(&self, payload: &Value) -> TemplateValues {
        match self {
            Self::RetentionClinicalRecords => {
                let d = RetentionValues::default();
                let hold = &payload["medicoLegalHold"];
                TemplateValues::Retention(RetentionValues {
                    opd_years: number(&payload["opdYears"], d.opd_years),
                    ipd_years: number(&payload["ipdYears"], d.ipd_years),
                    lab_years: number(&payload["labYears"], d.lab_years),
                    imaging_years: number(&payload["imagingYears"], d.imaging_years),
                    medico_legal_hold_enabled: truthy(&hold["enabled"]),
                    medico_legal_min_years: number(&hold["minYears"], d.medico_legal_min_years),
                })
            }
            Self::ConsentDefaults => TemplateValues::Consent(ConsentValues {
                default_scope: match payload["defaultScope"].as_array() {
                    Some(items) => items
                        .iter()
                        .filter_map(|v| serde_json::from_value(v.clone()).ok())
                        .collect(),
                    None => ConsentValues::default().default_scope,
                },
                default_status: if payload["defaultStatus"] == "WITHDRAWN" {
                    ConsentStatus::Withdrawn
                } else {
                    ConsentStatus::Granted
                },
                share_to_patient_portal: truthy(&payload["shareToPatientPortal"]),
                sms_consent_required: truthy(&payload["smsConsentRequired"]),
            }),
            Self::AuditLogging => TemplateValues::Audit(AuditValues {
                enabled: truthy(&payload["enabled"]),
                log_phi_access: truthy(&payload["logPHIAccess"]),
                log_exports: truthy(&payload["logExports"]),
                log_break_glass: truthy(&payload["logBreakGlass"]),
                retention_days: number(&payload["retentionDays"], AuditValues::default().retention_days),
            }),
            Self::ExportGuardrails => {
                let d = ExportValues::default();
                TemplateValues::Export(ExportValues {
                    max_rows: number(&payload["maxRows"], d.max_rows),
                    require_reason: truthy(&payload["requireReason"]),
                    watermark: truthy(&payload["watermark"]),
                    allow_phi_export: truthy(&payload["allowPHIExport"]),
                    approval_required_above_rows: number(
                        &payload["approvalRequiredAboveRows"],
                        d.approval_required_above_rows,
                    ),
                })
            }
            Self::BreakGlass => TemplateValues::BreakGlass(BreakGlassValues {
                enabled: truthy(&payload["enabled"]),
                require_justification: truthy(&payload["requireJustification"]),
                auto_expire_minutes: number(
                    &payload["autoExpireMinutes"],
                    BreakGlassValues::default().auto_expire_minutes,
                ),
                notify_security: truthy(&payload["notifySecurity"]),
            }),
        }
    }

    /// Template behind an existing policy: the code decides first, then the
    /// type, then export guardrails
    pub fn guess(code: &str, policy_type: &str) -> Self {
        const HINTS: [(&str, PolicyTemplate); 5] = [
            ("RETENTION", PolicyTemplate::RetentionClinicalRecords),
            ("CONSENT", PolicyTemplate::ConsentDefaults),
            ("AUDIT", PolicyTemplate::AuditLogging),
            ("EXPORT", PolicyTemplate::ExportGuardrails),
            ("BREAK", PolicyTemplate::BreakGlass),
        ];
        let code = code.to_uppercase();
        let policy_type = policy_type.to_uppercase();

        let by_code = |hint: &str| {
            if hint == "RETENTION" {
                code.contains("RETENTION_CLINICAL")
            } else {
                code.contains(hint)
            }
        };
        HINTS
            .iter()
            .find(|(hint, _)| by_code(*hint))
            .or_else(|| HINTS.iter().find(|(hint, _)| policy_type.contains(*hint)))
            .map(|(_, template)| *template)
            .unwrap_or(Self::ExportGuardrails)
    }
}

impl std::str::FromStr for PolicyTemplate {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl std::fmt::Display for PolicyTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Editable values ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionValues {
    pub opd_years: u32,
    pub ipd_years: u32,
    pub lab_years: u32,
    pub imaging_years: u32,
    pub medico_legal_hold_enabled: bool,
    pub medico_legal_min_years: u32,
}

impl Default for RetentionValues {
    fn default() -> Self {
        Self {
            opd_years: 5,
            ipd_years: 10,
            lab_years: 2,
            imaging_years: 5,
            medico_legal_hold_enabled: true,
            medico_legal_min_years: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentScope {
    View,
    Store,
    Share,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Granted,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentValues {
    pub default_scope: Vec<ConsentScope>,
    pub default_status: ConsentStatus,
    pub share_to_patient_portal: bool,
    pub sms_consent_required: bool,
}

impl Default for ConsentValues {
    fn default() -> Self {
        Self {
            default_scope: vec![ConsentScope::View, ConsentScope::Store],
            default_status: ConsentStatus::Granted,
            share_to_patient_portal: false,
            sms_consent_required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditValues {
    pub enabled: bool,
    #[serde(rename = "logPHIAccess")]
    pub log_phi_access: bool,
    pub log_exports: bool,
    pub log_break_glass: bool,
    pub retention_days: u32,
}

impl Default for AuditValues {
    fn default() -> Self {
        Self {
            enabled: true,
            log_phi_access: true,
            log_exports: true,
            log_break_glass: true,
            retention_days: 2555,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportValues {
    /// 0 effectively disables exports
    pub max_rows: u32,
    pub require_reason: bool,
    pub watermark: bool,
    #[serde(rename = "allowPHIExport")]
    pub allow_phi_export: bool,
    pub approval_required_above_rows: u32,
}

impl Default for ExportValues {
    fn default() -> Self {
        Self {
            max_rows: 50000,
            require_reason: true,
            watermark: true,
            allow_phi_export: false,
            approval_required_above_rows: 10000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakGlassValues {
    pub enabled: bool,
    pub require_justification: bool,
    pub auto_expire_minutes: u32,
    pub notify_security: bool,
}

impl Default for BreakGlassValues {
    fn default() -> Self {
        Self {
            enabled: true,
            require_justification: true,
            auto_expire_minutes: 60,
            notify_security: true,
        }
    }
}

/// Editable values of one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValues {
    Retention(RetentionValues),
    Consent(ConsentValues),
    Audit(AuditValues),
    Export(ExportValues),
    BreakGlass(BreakGlassValues),
}

impl TemplateValues {
    pub fn template(&self) -> PolicyTemplate {
        match self {
            Self::Retention(_) => PolicyTemplate::RetentionClinicalRecords,
            Self::Consent(_) => PolicyTemplate::ConsentDefaults,
            Self::Audit(_) => PolicyTemplate::AuditLogging,
            Self::Export(_) => PolicyTemplate::ExportGuardrails,
            Self::BreakGlass(_) => PolicyTemplate::BreakGlass,
        }
    }

    /// Version payload stored by the backend
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Retention(v) => json!({
                "opdYears": v.opd_years,
                "ipdYears": v.ipd_years,
                "labYears": v.lab_years,
                "imagingYears": v.imaging_years,
                "medicoLegalHold": {
                    "enabled": v.medico_legal_hold_enabled,
                    "minYears": v.medico_legal_min_years,
                },
            }),
            Self::Consent(v) => json!({
                "defaultScope": v.default_scope,
                "defaultStatus": v.default_status,
                "shareToPatientPortal": v.share_to_patient_portal,
                "smsConsentRequired": v.sms_consent_required,
            }),
            Self::Audit(v) => json!({
                "enabled": v.enabled,
                "logPHIAccess": v.log_phi_access,
                "logExports": v.log_exports,
                "logBreakGlass": v.log_break_glass,
                "retentionDays": v.retention_days,
            }),
            Self::Export(v) => json!({
                "maxRows": v.max_rows,
                "requireReason": v.require_reason,
                "watermark": v.watermark,
                "allowPHIExport": v.allow_phi_export,
                "approvalRequiredAboveRows": v.approval_required_above_rows,
            }),
            Self::BreakGlass(v) => json!({
                "enabled": v.enabled,
                "requireJustification": v.require_justification,
                "autoExpireMinutes": v.auto_expire_minutes,
                "notifySecurity": v.notify_security,
            }),
        }
    }

    /// Plain-language lines shown on the review step
    pub fn summary(&self) -> Vec<String> {
        let on_off = |flag: bool, yes: &str, no: &str| (if flag { yes } else { no }).to_string();
        match self {
            Self::Retention(v) => vec![
                format!("OPD records retained for {} years.", v.opd_years),
                format!("IPD records retained for {} years.", v.ipd_years),
                format!("Lab records retained for {} years.", v.lab_years),
                format!("Imaging retained for {} years.", v.imaging_years),
                if v.medico_legal_hold_enabled {
                    format!(
                        "Medico-legal hold enabled (minimum {} years).",
                        v.medico_legal_min_years
                    )
                } else {
                    "Medico-legal hold disabled.".to_string()
                },
            ],
            Self::Consent(v) => {
                let scope = v
                    .default_scope
                    .iter()
                    .map(|s| match s {
                        ConsentScope::View => "VIEW",
                        ConsentScope::Store => "STORE",
                        ConsentScope::Share => "SHARE",
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let status = match v.default_status {
                    ConsentStatus::Granted => "GRANTED",
                    ConsentStatus::Withdrawn => "WITHDRAWN",
                };
                vec![
                    format!("Default consent status: {status}."),
                    format!("Default scope: {}.", if scope.is_empty() { "None" } else { &scope }),
                    on_off(
                        v.share_to_patient_portal,
                        "Sharing to patient portal is enabled.",
                        "Sharing to patient portal is disabled.",
                    ),
                    on_off(
                        v.sms_consent_required,
                        "SMS consent is required.",
                        "SMS consent is not required.",
                    ),
                ]
            }
            Self::Audit(v) => vec![
                on_off(v.enabled, "Audit logging is enabled.", "Audit logging is disabled."),
                on_off(
                    v.log_phi_access,
                    "PHI access events are logged.",
                    "PHI access events are not logged.",
                ),
                on_off(v.log_exports, "Export events are logged.", "Export events are not logged."),
                on_off(
                    v.log_break_glass,
                    "Break-glass events are logged.",
                    "Break-glass events are not logged.",
                ),
                format!("Retention: {} days.", v.retention_days),
            ],
            Self::Export(v) => vec![
                format!("Max rows per export: {}.", v.max_rows),
                on_off(
                    v.require_reason,
                    "Export reason is required.",
                    "Export reason is not required.",
                ),
                on_off(v.watermark, "Exports are watermarked.", "Exports are not watermarked."),
                on_off(
                    v.allow_phi_export,
                    "PHI export is allowed.",
                    "PHI export is blocked by default.",
                ),
                format!(
                    "Approval required above: {} rows.",
                    v.approval_required_above_rows
                ),
            ],
            Self::BreakGlass(v) => vec![
                on_off(v.enabled, "Break-glass is enabled.", "Break-glass is disabled."),
                on_off(
                    v.require_justification,
                    "Justification is mandatory.",
                    "Justification is not mandatory.",
                ),
                format!("Auto-expire: {} minutes.", v.auto_expire_minutes),
                on_off(
                    v.notify_security,
                    "Security notifications are enabled.",
                    "Security notifications are disabled.",
                ),
            ],
        }
    }

    /// Set one field by its camelCase name, e.g. `("maxRows", "100000")`.
    /// The raw value is read as JSON, falling back to a plain string.
    pub fn set(&mut self, key: &str, raw: &str) -> AppResult<()> {
        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
        let mut fields = self.fields();
        match fields.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                return Err(AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("{} has no setting named {key}", self.template().name()),
                ));
            }
        }
        let invalid = |e: serde_json::Error| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid value for {key}"))
                .with_detail("cause", e.to_string())
        };
        let fields = Value::Object(fields);
        *self = match self {
            Self::Retention(_) => Self::Retention(serde_json::from_value(fields).map_err(invalid)?),
            Self::Consent(_) => Self::Consent(serde_json::from_value(fields).map_err(invalid)?),
            Self::Audit(_) => Self::Audit(serde_json::from_value(fields).map_err(invalid)?),
            Self::Export(_) => Self::Export(serde_json::from_value(fields).map_err(invalid)?),
            Self::BreakGlass(_) => {
                Self::BreakGlass(serde_json::from_value(fields).map_err(invalid)?)
            }
        };
        Ok(())
    }

    /// Flat camelCase view of the editable fields
    fn fields(&self) -> serde_json::Map<String, Value> {
        let value = match self {
            Self::Retention(v) => serde_json::to_value(v),
            Self::Consent(v) => serde_json::to_value(v),
            Self::Audit(v) => serde_json::to_value(v),
            Self::Export(v) => serde_json::to_value(v),
            Self::BreakGlass(v) => serde_json::to_value(v),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Whole number from a JSON number or numeric string
fn number(value: &Value, fallback: u32) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .unwrap_or(fallback)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

// ── Packs ───────────────────────────────────────────────────────────

/// One policy of a pack with its preset values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackItem {
    pub values: TemplateValues,
    pub note: Option<&'static str>,
}

impl PackItem {
    fn new(values: TemplateValues, note: &'static str) -> Self {
        Self {
            values,
            note: Some(note),
        }
    }

    pub fn template(&self) -> PolicyTemplate {
        self.values.template()
    }
}

/// Set of policies installed together as drafts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyPack {
    pub id: &'static str,
    pub name: &'static str,
    pub tag: &'static str,
    pub description: &'static str,
    pub items: Vec<PackItem>,
}

impl PolicyPack {
    pub const IDS: [&'static str; 3] = [
        "zypocare_recommended_baseline",
        "privacy_compliance_strict",
        "operational_high_throughput",
    ];

    pub fn all() -> Vec<PolicyPack> {
        Self::IDS.iter().filter_map(|id| Self::find(id)).collect()
    }

    pub fn find(id: &str) -> Option<PolicyPack> {
        use TemplateValues as V;
        let pack = match id {
            "zypocare_recommended_baseline" => Self {
                id: "zypocare_recommended_baseline",
                name: "ZypoCare Recommended Baseline",
                tag: "Recommended",
                description: "A balanced default pack for most hospitals: controlled exports, \
                    emergency access with audit, and reasonable retention settings.",
                items: vec![
                    PackItem::new(
                        V::Export(ExportValues::default()),
                        "Keeps exports practical but controlled for privacy and misuse.",
                    ),
                    PackItem::new(
                        V::BreakGlass(BreakGlassValues::default()),
                        "Emergency access with mandatory justification and auto-expiry.",
                    ),
                    PackItem::new(
                        V::Audit(AuditValues::default()),
                        "Audit logging with safe retention defaults.",
                    ),
                    PackItem::new(
                        V::Consent(ConsentValues::default()),
                        "A conservative, patient-safe consent posture.",
                    ),
                    PackItem::new(
                        V::Retention(RetentionValues::default()),
                        "Medico-legal safe clinical retention baseline.",
                    ),
                ],
            },
            "privacy_compliance_strict" => Self {
                id: "privacy_compliance_strict",
                name: "Privacy & Compliance (Strict)",
                tag: "Strict",
                description: "For high compliance environments: stricter exports, stronger \
                    break-glass evidence, and longer retention.",
                items: vec![
                    PackItem::new(
                        V::Export(ExportValues {
                            max_rows: 0,
                            approval_required_above_rows: 0,
                            ..ExportValues::default()
                        }),
                        "Effectively disables exports (maxRows=0). You can later enable selectively.",
                    ),
                    PackItem::new(
                        V::BreakGlass(BreakGlassValues {
                            auto_expire_minutes: 20,
                            ..BreakGlassValues::default()
                        }),
                        "Shorter emergency sessions; security notifications enabled.",
                    ),
                    PackItem::new(
                        V::Audit(AuditValues {
                            retention_days: 1825,
                            ..AuditValues::default()
                        }),
                        "5-year audit retention.",
                    ),
                    PackItem::new(
                        V::Retention(RetentionValues {
                            opd_years: 10,
                            ipd_years: 15,
                            lab_years: 5,
                            imaging_years: 10,
                            medico_legal_hold_enabled: true,
                            medico_legal_min_years: 15,
                        }),
                        "Longer retention for high-compliance environments.",
                    ),
                ],
            },
            "operational_high_throughput" => Self {
                id: "operational_high_throughput",
                name: "Operational (High Throughput)",
                tag: "Operational",
                description: "For busy hospitals: allows controlled reporting with higher export \
                    limits while keeping governance intact.",
                items: vec![
                    PackItem::new(
                        V::Export(ExportValues {
                            max_rows: 100000,
                            approval_required_above_rows: 25000,
                            ..ExportValues::default()
                        }),
                        "Higher limits for operational reporting, while keeping approvals in place.",
                    ),
                    PackItem::new(
                        V::BreakGlass(BreakGlassValues {
                            auto_expire_minutes: 15,
                            notify_security: false,
                            ..BreakGlassValues::default()
                        }),
                        "Shorter emergency sessions reduce misuse.",
                    ),
                    PackItem::new(
                        V::Audit(AuditValues {
                            retention_days: 730,
                            ..AuditValues::default()
                        }),
                        "2-year retention for audit trail.",
                    ),
                    PackItem {
                        values: V::Consent(ConsentValues::default()),
                        note: None,
                    },
                ],
            },
            _ => return None,
        };
        Some(pack)
    }
}
