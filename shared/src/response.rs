//! API response envelopes
//!
//! The administration API answers list endpoints either with a bare array
//! or with `{ "rows": [...] }`, and reports failures in the NestJS error
//! shape `{ statusCode, message, error }` where `message` may be a string
//! or an array of validation messages.

use serde::{Deserialize, Serialize};

/// Message shown when a failure carries no usable message
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// List response in either accepted shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Rows {
        rows: Vec<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(rows) | Self::Rows { rows, .. } => rows,
        }
    }
}

impl<T> From<ListEnvelope<T>> for Vec<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        envelope.into_vec()
    }
}

/// `message` field of an error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    /// Single line; multiple messages are joined with `"; "`
    pub fn text(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(list) => list.join("; "),
        }
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best available message: `message`, then `error`
    pub fn message_text(&self) -> Option<String> {
        self.message
            .as_ref()
            .map(ErrorMessage::text)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.clone().filter(|e| !e.trim().is_empty()))
    }

    /// Extract a message from a raw body, falling back to the raw text
    pub fn message_from_raw(raw: &str) -> String {
        if let Ok(body) = serde_json::from_str::<ApiErrorBody>(raw)
            && let Some(message) = body.message_text()
        {
            return message;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('<') {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// `{ "id": ... }` response returned by create-style endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}
