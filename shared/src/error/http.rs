//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CaseNotFound
            | Self::PolicyNotFound
            | Self::PreauthNotFound
            | Self::ResourceNotFound
            | Self::RoomNotFound
            | Self::UnitNotFound
            | Self::PackageNotFound
            | Self::ComponentNotFound
            | Self::CodeSetNotFound
            | Self::DraftNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::StaleState => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 503 Service Unavailable
            Self::NetworkError | Self::TimeoutError | Self::ServiceUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and lifecycle rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Best-effort mapping from an HTTP status returned by the backend
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationFailed,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::StaleState,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::TimeoutError,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => Self::ServiceUnavailable,
            s if s.is_success() => Self::Success,
            s if s.is_server_error() => Self::InternalError,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::CaseNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DraftNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_lifecycle_errors_are_bad_request() {
        assert_eq!(
            ErrorCode::TransitionNotAllowed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::ReasonRequired.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::StaleState.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_from_http_status() {
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::BAD_REQUEST),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::FORBIDDEN),
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::CONFLICT),
            ErrorCode::StaleState
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorCode::InternalError
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::IM_A_TEAPOT),
            ErrorCode::Unknown
        );
    }
}
