//! Unified error codes for the hospital administration client
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / branch scope errors
//! - 3xxx: Lifecycle (status transition) errors
//! - 4xxx: Billing errors (insurance cases, policies, preauth)
//! - 5xxx: Infrastructure errors (resources, rooms, units)
//! - 6xxx: Catalog errors (service packages, service library)
//! - 7xxx: Governance errors (policies, drafts)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,
    /// Token is invalid
    TokenInvalid = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// A branch must be selected for this operation
    BranchScopeRequired = 2002,

    // ==================== 3xxx: Lifecycle ====================
    /// Target status is not reachable from the current status
    TransitionNotAllowed = 3001,
    /// A reason is required for the target status
    ReasonRequired = 3002,
    /// Record is in a terminal status
    TerminalStatus = 3003,
    /// Record changed on the server since it was loaded
    StaleState = 3004,

    // ==================== 4xxx: Billing ====================
    /// Insurance case not found
    CaseNotFound = 4001,
    /// Insurance policy not found
    PolicyNotFound = 4002,
    /// Pre-authorization request not found
    PreauthNotFound = 4003,
    /// Approved amount is required
    ApprovedAmountRequired = 4004,
    /// Rejection reason is required
    RejectionReasonRequired = 4005,
    /// Query text is required
    QueryTextRequired = 4006,

    // ==================== 5xxx: Infrastructure ====================
    /// Resource not found
    ResourceNotFound = 5001,
    /// Room not found
    RoomNotFound = 5002,
    /// Unit not found
    UnitNotFound = 5003,
    /// Deactivation reason is required
    DeactivationReasonRequired = 5004,
    /// Record is inactive
    RecordInactive = 5005,

    // ==================== 6xxx: Catalog ====================
    /// Service package not found
    PackageNotFound = 6001,
    /// Package component not found
    ComponentNotFound = 6002,
    /// Code set not found
    CodeSetNotFound = 6101,
    /// Rules / meta JSON could not be parsed
    InvalidRulesJson = 6201,

    // ==================== 7xxx: Governance ====================
    /// Policy code is required
    PolicyCodeRequired = 7001,
    /// Policy name is required
    PolicyNameRequired = 7002,
    /// Policy draft not found
    DraftNotFound = 7003,
    /// Pack install with every policy deselected
    NoPolicySelected = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Operation timeout
    TimeoutError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Backend unavailable
    ServiceUnavailable = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::BranchScopeRequired => "Select a branch first",

            // Lifecycle
            ErrorCode::TransitionNotAllowed => "Transition is not allowed from the current status",
            ErrorCode::ReasonRequired => "Reason is required for this state",
            ErrorCode::TerminalStatus => "Record is in a terminal status",
            ErrorCode::StaleState => "Record was changed since it was loaded",

            // Billing
            ErrorCode::CaseNotFound => "Insurance case not found",
            ErrorCode::PolicyNotFound => "Insurance policy not found",
            ErrorCode::PreauthNotFound => "Pre-authorization not found",
            ErrorCode::ApprovedAmountRequired => "Approved amount is required.",
            ErrorCode::RejectionReasonRequired => "Rejection reason is required.",
            ErrorCode::QueryTextRequired => "Query text is required.",

            // Infrastructure
            ErrorCode::ResourceNotFound => "Resource not found",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::UnitNotFound => "Unit not found",
            ErrorCode::DeactivationReasonRequired => "Deactivation reason is required",
            ErrorCode::RecordInactive => "Record is inactive",

            // Catalog
            ErrorCode::PackageNotFound => "Service package not found",
            ErrorCode::ComponentNotFound => "Package component not found",
            ErrorCode::CodeSetNotFound => "Code set not found",
            ErrorCode::InvalidRulesJson => "Invalid rules JSON",

            // Governance
            ErrorCode::PolicyCodeRequired => "Policy code is required.",
            ErrorCode::PolicyNameRequired => "Policy name is required.",
            ErrorCode::DraftNotFound => "Policy draft not found",
            ErrorCode::NoPolicySelected => "Please select at least one policy.",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ServiceUnavailable => "Service unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),
            1003 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::BranchScopeRequired),

            // Lifecycle
            3001 => Ok(ErrorCode::TransitionNotAllowed),
            3002 => Ok(ErrorCode::ReasonRequired),
            3003 => Ok(ErrorCode::TerminalStatus),
            3004 => Ok(ErrorCode::StaleState),

            // Billing
            4001 => Ok(ErrorCode::CaseNotFound),
            4002 => Ok(ErrorCode::PolicyNotFound),
            4003 => Ok(ErrorCode::PreauthNotFound),
            4004 => Ok(ErrorCode::ApprovedAmountRequired),
            4005 => Ok(ErrorCode::RejectionReasonRequired),
            4006 => Ok(ErrorCode::QueryTextRequired),

            // Infrastructure
            5001 => Ok(ErrorCode::ResourceNotFound),
            5002 => Ok(ErrorCode::RoomNotFound),
            5003 => Ok(ErrorCode::UnitNotFound),
            5004 => Ok(ErrorCode::DeactivationReasonRequired),
            5005 => Ok(ErrorCode::RecordInactive),

            // Catalog
            6001 => Ok(ErrorCode::PackageNotFound),
            6002 => Ok(ErrorCode::ComponentNotFound),
            6101 => Ok(ErrorCode::CodeSetNotFound),
            6201 => Ok(ErrorCode::InvalidRulesJson),

            // Governance
            7001 => Ok(ErrorCode::PolicyCodeRequired),
            7002 => Ok(ErrorCode::PolicyNameRequired),
            7003 => Ok(ErrorCode::DraftNotFound),
            7004 => Ok(ErrorCode::NoPolicySelected),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::TransitionNotAllowed.code(), 3001);
        assert_eq!(ErrorCode::ReasonRequired.code(), 3002);
        assert_eq!(ErrorCode::RejectionReasonRequired.code(), 4005);
        assert_eq!(ErrorCode::DeactivationReasonRequired.code(), 5004);
        assert_eq!(ErrorCode::InvalidRulesJson.code(), 6201);
        assert_eq!(ErrorCode::PolicyCodeRequired.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3002), Ok(ErrorCode::ReasonRequired));
        assert_eq!(ErrorCode::try_from(9005), Ok(ErrorCode::ServiceUnavailable));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(InvalidErrorCode(4242).to_string(), "invalid error code: 4242");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::ReasonRequired).unwrap();
        assert_eq!(json, "3002");

        let code: ErrorCode = serde_json::from_str("5004").unwrap();
        assert_eq!(code, ErrorCode::DeactivationReasonRequired);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::ReasonRequired.to_string(), "E3002");
    }

    #[test]
    fn test_reason_message_matches_form_text() {
        assert_eq!(
            ErrorCode::ReasonRequired.message(),
            "Reason is required for this state"
        );
    }
}
