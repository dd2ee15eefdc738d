// hims-client/tests/endpoints.rs
// Request paths and bodies of the catalog, governance and branch clients

mod support;

use hims_client::HimsClient;
use hims_client::api::{PackInstall, PackStep, PolicyWizard, WizardStep};
use serde_json::json;
use shared::ErrorCode;
use shared::models::{CodeSetEntryUpsert, PolicyPack, PolicyTemplate, ServicePackageUpsert};
use std::sync::Arc;
use support::*;

const PACKAGES: &str = "/api/infrastructure/service-packages";
const LIBRARY: &str = "/api/infrastructure/service-library";
const POLICIES: &str = "/api/governance/policies";
const VERSIONS: &str = "/api/governance/policy-versions";

fn setup() -> (Arc<MockHttpClient>, HimsClient<MockHttpClient>) {
    let http = Arc::new(MockHttpClient::new());
    let client = HimsClient::new(http.clone());
    (http, client)
}

#[tokio::test]
async fn test_package_create_is_branch_scoped() {
    let (http, client) = setup();
    http.reply("POST", PACKAGES, package_row("pkg-1", "DRAFT"));

    let payload = ServicePackageUpsert {
        code: "CATARACT".into(),
        name: "Cataract surgery".into(),
        description: None,
    };
    client.packages.create("b-1", &payload).await.unwrap();

    let call = &http.calls()[0];
    assert_eq!(call.path, format!("{PACKAGES}?branchId=b-1"));
    assert_eq!(
        call.body,
        Some(json!({ "code": "CATARACT", "name": "Cataract surgery" }))
    );
}

#[tokio::test]
async fn test_component_form_rejects_bad_rules_locally() {
    let (http, client) = setup();
    http.reply("POST", &format!("{PACKAGES}/pkg-1/components"), json!({}));

    let err = client
        .packages
        .save_component_form("pkg-1", "svc-1", 1, true, "{ not json")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidRulesJson);
    assert!(http.calls().is_empty());

    let component = client
        .packages
        .save_component_form("pkg-1", " svc-1 ", 0, false, r#"{"maxDays": 3}"#)
        .await
        .unwrap();
    // Quantity is at least one
    assert_eq!(component.quantity, 1);
    assert_eq!(
        http.calls()[0].body,
        Some(json!({
            "serviceItemId": "svc-1",
            "quantity": 1,
            "isIncluded": false,
            "rules": { "maxDays": 3 }
        }))
    );
}

#[tokio::test]
async fn test_remove_component_by_service_item() {
    let (http, client) = setup();
    http.reply(
        "DELETE",
        &format!("{PACKAGES}/pkg-1/components/svc%2F1"),
        json!(null),
    );
    client
        .packages
        .remove_component("pkg-1", "svc/1")
        .await
        .unwrap();
    assert_eq!(http.calls_to("DELETE").len(), 1);
}

#[tokio::test]
async fn test_service_library_paths() {
    let (http, client) = setup();
    let entries = format!("{LIBRARY}/code-sets/cs-1/entries");
    http.reply("GET", &entries, json!({ "rows": [] }));
    http.reply("POST", &entries, json!({}));
    http.reply("DELETE", &format!("{entries}/ICD%2010%2FA"), json!(null));

    let library = &client.service_library;
    library.list_entries("b-1", "cs-1", Some("fever")).await.unwrap();
    library
        .upsert_entry(
            "b-1",
            "cs-1",
            &CodeSetEntryUpsert {
                code: "A09".into(),
                display: "Gastroenteritis".into(),
                attributes: None,
            },
        )
        .await
        .unwrap();
    library.delete_entry("b-1", "cs-1", "ICD 10/A").await.unwrap();

    let paths: Vec<_> = http.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec![
            format!("{entries}?branchId=b-1&q=fever"),
            format!("{entries}?branchId=b-1"),
            format!("{entries}/ICD%2010%2FA?branchId=b-1"),
        ]
    );
}

#[tokio::test]
async fn test_policy_wizard_runs_three_calls() {
    let (http, client) = setup();
    http.reply(
        "POST",
        POLICIES,
        json!({ "id": "gp-1", "code": "RETENTION_CLINICAL", "name": "Retention", "type": "RETENTION" }),
    );
    http.reply(
        "POST",
        &format!("{POLICIES}/RETENTION_CLINICAL/drafts"),
        json!({ "id": "draft-1", "version": 1, "status": "DRAFT" }),
    );
    http.reply("PATCH", &format!("{VERSIONS}/draft-1"), json!({}));

    let mut wizard = PolicyWizard::new(PolicyTemplate::RetentionClinicalRecords);
    assert_eq!(wizard.next(), WizardStep::Configure);
    wizard.code = "retention clinical".into();
    wizard.name = "Retention".into();
    wizard.values.set("opdYears", "7").unwrap();
    wizard.effective_at = "2026-04-01T09:00:00Z".into();
    wizard.notes = " First cut ".into();
    assert_eq!(wizard.next(), WizardStep::Review);

    let draft = client.governance.create_with_draft(&wizard).await.unwrap();
    assert_eq!(draft.id, "draft-1");

    let calls = http.calls();
    assert_eq!(calls.len(), 3);
    let create = calls[0].body.clone().unwrap();
    assert_eq!(create["type"], "RETENTION");
    assert_eq!(
        create["description"],
        PolicyTemplate::RetentionClinicalRecords.description()
    );
    assert_eq!(calls[1].body, None);
    let update = calls[2].body.clone().unwrap();
    assert_eq!(update["payload"]["opdYears"], 7);
    assert_eq!(update["payload"]["medicoLegalHold"]["minYears"], 10);
    assert_eq!(update["notes"], "First cut");
    assert_eq!(update["effectiveAt"], "2026-04-01T09:00:00.000Z");
    assert_eq!(update["applyToAllBranches"], true);
}

#[tokio::test]
async fn test_invalid_policy_wizard_sends_nothing() {
    let (http, client) = setup();
    let mut wizard = PolicyWizard::new(PolicyTemplate::AuditLogging);
    wizard.name = "   ".into();
    let err = client.governance.create_with_draft(&wizard).await.unwrap_err();
    assert!(err.is_local());

    wizard.name = "Audit".into();
    wizard.effective_at = "someday".into();
    let err = client.governance.create_with_draft(&wizard).await.unwrap_err();
    assert!(err.is_local());
    assert!(http.calls().is_empty());
}

#[tokio::test]
async fn test_pack_install_creates_missing_and_reuses_open_draft() {
    let (http, client) = setup();
    // Export guardrails does not exist yet (GET is unscripted, 404)
    http.reply(
        "POST",
        POLICIES,
        json!({ "id": "gp-1", "code": "EXPORT_GUARDRAILS", "name": "Export Guardrails", "type": "EXPORTS" }),
    );
    http.reply(
        "POST",
        &format!("{POLICIES}/EXPORT_GUARDRAILS/drafts"),
        json!({ "id": "d-exp" }),
    );
    // Break-glass exists and already has an open draft
    http.reply(
        "GET",
        &format!("{POLICIES}/BREAK_GLASS"),
        json!({ "code": "BREAK_GLASS", "name": "Break-Glass Controls", "type": "BREAK_GLASS", "draft": { "id": "d-bg" } }),
    );
    http.fail(
        "POST",
        &format!("{POLICIES}/BREAK_GLASS/drafts"),
        409,
        "Draft already exists",
    );
    http.reply("PATCH", &format!("{VERSIONS}/d-exp"), json!({}));
    http.reply("PATCH", &format!("{VERSIONS}/d-bg"), json!({}));

    let mut install = PackInstall::new(PolicyPack::find("privacy_compliance_strict").unwrap());
    install.select_only(&[PolicyTemplate::ExportGuardrails, PolicyTemplate::BreakGlass]);
    install.install_note = "Go-live".into();
    assert_eq!(install.next(), PackStep::Customize);
    assert_eq!(install.next(), PackStep::Review);

    let count = client.governance.install_pack(&install).await.unwrap();
    assert_eq!(count, 2);

    let calls: Vec<_> = http
        .calls()
        .into_iter()
        .map(|c| format!("{} {}", c.method, c.path))
        .collect();
    assert_eq!(
        calls,
        vec![
            format!("GET {POLICIES}/EXPORT_GUARDRAILS"),
            format!("POST {POLICIES}"),
            format!("POST {POLICIES}/EXPORT_GUARDRAILS/drafts"),
            format!("PATCH {VERSIONS}/d-exp"),
            format!("GET {POLICIES}/BREAK_GLASS"),
            format!("POST {POLICIES}/BREAK_GLASS/drafts"),
            format!("GET {POLICIES}/BREAK_GLASS"),
            format!("PATCH {VERSIONS}/d-bg"),
        ]
    );

    let mutations = http.mutations();
    assert_eq!(
        mutations[0].body,
        Some(json!({
            "code": "EXPORT_GUARDRAILS",
            "name": "Export Guardrails",
            "type": "EXPORTS",
            "description": PolicyTemplate::ExportGuardrails.description()
        }))
    );
    let export = mutations[2].body.clone().unwrap();
    assert_eq!(export["payload"]["maxRows"], 0);
    assert_eq!(
        export["notes"],
        "Go-live • Effectively disables exports (maxRows=0). You can later enable selectively."
    );
    assert!(export.get("effectiveAt").is_none());
    let break_glass = mutations[4].body.clone().unwrap();
    assert_eq!(break_glass["payload"]["autoExpireMinutes"], 20);
}

#[tokio::test]
async fn test_pack_install_stops_when_open_draft_is_missing() {
    let (http, client) = setup();
    http.reply(
        "GET",
        &format!("{POLICIES}/AUDIT_LOGGING"),
        json!({ "code": "AUDIT_LOGGING", "name": "Audit Logging", "type": "AUDIT", "draft": null }),
    );
    http.fail(
        "POST",
        &format!("{POLICIES}/AUDIT_LOGGING/drafts"),
        409,
        "Draft already exists",
    );

    let mut install = PackInstall::new(PolicyPack::find("zypocare_recommended_baseline").unwrap());
    install.select_only(&[PolicyTemplate::AuditLogging, PolicyTemplate::BreakGlass]);

    let err = client.governance.install_pack(&install).await.unwrap_err();
    assert_eq!(err.to_string(), "Draft already exists but could not be loaded.");
    // Break-glass was never reached
    assert!(http.calls_to("PATCH").is_empty());
    assert!(http.calls().iter().all(|c| !c.path.contains("BREAK_GLASS")));
}

#[tokio::test]
async fn test_pack_install_needs_a_selection() {
    let (http, client) = setup();
    let mut install = PackInstall::new(PolicyPack::find("operational_high_throughput").unwrap());
    install.select_only(&[]);
    let err = client.governance.install_pack(&install).await.unwrap_err();
    assert_eq!(err.to_string(), "Please select at least one policy.");
    assert!(http.calls().is_empty());
}

#[tokio::test]
async fn test_branch_name_falls_back_to_list_then_id() {
    let (http, client) = setup();
    http.reply(
        "GET",
        "/api/branches",
        json!([{ "id": "b-1", "code": "BLR", "name": "Bangalore" }]),
    );

    // Single lookup is unscripted (404), the list has it
    assert_eq!(client.branches.resolve_name("b-1").await, "BLR - Bangalore");
    // Neither knows it
    assert_eq!(client.branches.resolve_name("b-9").await, "b-9");
}

#[tokio::test]
async fn test_policy_verify_has_no_body() {
    let (http, client) = setup();
    http.reply("POST", "/api/billing/insurance-policies/pol-1/verify", json!(null));
    client.policies.verify("pol-1").await.unwrap();
    let call = &http.calls()[0];
    assert_eq!(call.method, "POST");
    assert_eq!(call.body, None);
}
