// hims-client/tests/network_client.rs
// NetworkHttpClient against a local axum server

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use hims_client::{ClientConfig, ClientError, HimsClient, HttpClient, ListSource, NetworkHttpClient};
use serde_json::{Value, json};
use shared::lifecycle::CaseStatus;
use shared::models::CaseFilter;

async fn list_cases(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 401, "message": "Unauthorized" })),
        ));
    }
    Ok(Json(json!({
        "rows": [{
            "id": "c-1",
            "branchId": "b-1",
            "caseNumber": "IC-1",
            "patientId": "p-1",
            "encounterId": "enc-1",
            "policyId": "pol-1",
            "payerId": "payer-1",
            "caseType": "CASHLESS",
            "status": "DRAFT"
        }]
    })))
}

async fn transition(Path(id): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if id == "locked" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "statusCode": 400,
                "message": ["Case is locked", "Settlement in progress"],
                "error": "Bad Request"
            })),
        );
    }
    (StatusCode::OK, Json(json!({ "id": id, "status": body["targetStatus"] })))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/billing/insurance-cases", get(list_cases))
        .route("/api/billing/insurance-cases/{id}/transition", post(transition))
        .route("/api/empty", post(|| async { StatusCode::NO_CONTENT }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, token: Option<&str>) -> HimsClient<NetworkHttpClient> {
    let mut config = ClientConfig::new(base_url);
    if let Some(token) = token {
        config = config.with_token(token);
    }
    HimsClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_list_with_bearer_token() {
    let base = spawn_server().await;
    let rows = client(&base, Some("test-token"))
        .cases
        .list(&CaseFilter::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, CaseStatus::Draft);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let base = spawn_server().await;
    let err = client(&base, None)
        .cases
        .list(&CaseFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_server_message_is_kept_verbatim() {
    let base = spawn_server().await;
    let api = client(&base, Some("test-token"));

    api.cases
        .transition("c-1", CaseStatus::PolicyVerified)
        .await
        .unwrap();

    let err = api
        .cases
        .transition("locked", CaseStatus::PolicyVerified)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Case is locked; Settlement in progress");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let base = spawn_server().await;
    let http = NetworkHttpClient::new(&ClientConfig::new(&base)).unwrap();
    let reply: Option<Value> = http.post_empty("/api/empty").await.unwrap();
    assert!(reply.is_none());
}
