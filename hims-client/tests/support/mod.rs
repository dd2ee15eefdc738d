//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use hims_client::{ClientError, ClientResult, HttpClient};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    /// Full path including the query string
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Ok(Value),
    Err(u16, String),
}

#[derive(Debug, Clone)]
struct Reply {
    outcome: Outcome,
    delay: Option<Duration>,
}

/// Scripted [`HttpClient`]
///
/// Replies are keyed by method and path without the query string. Each
/// route replays its queue in order and repeats the last reply once the
/// queue is down to one. Unscripted routes answer 404.
#[derive(Default)]
pub struct MockHttpClient {
    routes: Mutex<HashMap<(String, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: &str, path: &str, reply: Reply) {
        self.routes
            .lock()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: &str, path: &str, value: Value) -> &Self {
        self.push(method, path, Reply { outcome: Outcome::Ok(value), delay: None });
        self
    }

    pub fn reply_after(&self, method: &str, path: &str, delay: Duration, value: Value) -> &Self {
        self.push(method, path, Reply { outcome: Outcome::Ok(value), delay: Some(delay) });
        self
    }

    pub fn fail(&self, method: &str, path: &str, status: u16, message: &str) -> &Self {
        self.push(
            method,
            path,
            Reply { outcome: Outcome::Err(status, message.to_string()), delay: None },
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    /// Every request except list/detail GETs
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method != "GET").collect()
    }

    fn next_reply(&self, method: &str, path: &str) -> Option<Reply> {
        let route = path.split('?').next().unwrap_or(path);
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(&(method.to_string(), route.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    async fn respond<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        self.calls.lock().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        let Some(reply) = self.next_reply(method, path) else {
            return Err(ClientError::from_status(404, format!("Cannot {method} {path}")));
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        match reply.outcome {
            Outcome::Ok(value) => Ok(serde_json::from_value(value)?),
            Outcome::Err(status, message) => Err(ClientError::from_status(status, message)),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("GET", path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.respond("POST", path, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("POST", path, None).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.respond("PATCH", path, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("DELETE", path, None).await
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn case_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "caseNumber": format!("IC-{id}"),
        "patientId": "p-1",
        "encounterId": "enc-1",
        "policyId": "pol-1",
        "payerId": "payer-1",
        "caseType": "CASHLESS",
        "status": status
    })
}

pub fn resource_row(id: &str, state: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "unitId": "unit-1",
        "roomId": "room-1",
        "code": format!("BED-{id}"),
        "name": "ICU Bed",
        "resourceType": "ICU_BED",
        "currentState": state,
        "isActive": true
    })
}

pub fn preauth_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "insuranceCaseId": "case-1",
        "requestNumber": format!("PA-{id}"),
        "status": status,
        "requestedAmount": 85000
    })
}

pub fn room_row(id: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "unitId": "unit-1",
        "code": format!("R-{id}"),
        "name": "Ward room",
        "isActive": true
    })
}

pub fn unit_row(id: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "departmentId": "dept-1",
        "unitTypeId": "ut-icu",
        "code": "ICU-1",
        "name": "Medical ICU",
        "isActive": true
    })
}

pub fn package_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "branchId": "b-1",
        "code": format!("PKG-{id}"),
        "name": "Cataract surgery",
        "status": status
    })
}
