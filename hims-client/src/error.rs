//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
///
/// Server failures carry the server's message verbatim so it can be shown
/// to the operator as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response not covered by a more specific variant
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 401
    #[error("{0}")]
    Unauthorized(String),

    /// 403
    #[error("{0}")]
    Forbidden(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// Rejected locally; no request was sent
    #[error("{0}")]
    Validation(#[from] AppError),

    /// Target status is not reachable from the current one; no request was sent
    #[error("Cannot move from {from} to {to}")]
    TransitionNotAllowed { from: String, to: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build the error for a non-2xx status and its extracted message
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status of a server failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Failure raised before any request left the client
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::TransitionNotAllowed { .. })
    }

    /// Error code classification, for logging and exit codes
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code,
            Self::TransitionNotAllowed { .. } => ErrorCode::TransitionNotAllowed,
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Config(_) => ErrorCode::ConfigError,
            other => other
                .status()
                .and_then(|s| http::StatusCode::from_u16(s).ok())
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::Unknown),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_keeps_message() {
        let err = ClientError::from_status(409, "Resource is OCCUPIED".into());
        assert_eq!(err.to_string(), "Resource is OCCUPIED");
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.code(), ErrorCode::StaleState);

        let err = ClientError::from_status(403, "Branch scope required".into());
        assert!(matches!(err, ClientError::Forbidden(_)));
        assert_eq!(err.to_string(), "Branch scope required");
    }

    #[test]
    fn test_local_errors() {
        let err: ClientError = AppError::new(ErrorCode::ReasonRequired).into();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Reason is required for this state");
        assert_eq!(err.code(), ErrorCode::ReasonRequired);

        let err = ClientError::TransitionNotAllowed {
            from: "DRAFT".into(),
            to: "SETTLED".into(),
        };
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Cannot move from DRAFT to SETTLED");
        assert!(!ClientError::from_status(500, "boom".into()).is_local());
    }
}
