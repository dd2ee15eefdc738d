//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Lifecycle errors
/// - 4xxx: Billing errors
/// - 5xxx: Infrastructure errors
/// - 6xxx: Catalog errors
/// - 7xxx: Governance errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Lifecycle errors (3xxx)
    Lifecycle,
    /// Billing errors (4xxx)
    Billing,
    /// Infrastructure errors (5xxx)
    Infrastructure,
    /// Catalog errors (6xxx)
    Catalog,
    /// Governance errors (7xxx)
    Governance,
    /// System errors (8xxx and above)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Lifecycle,
            4000..5000 => Self::Billing,
            5000..6000 => Self::Infrastructure,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Governance,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Lifecycle => "lifecycle",
            Self::Billing => "billing",
            Self::Infrastructure => "infrastructure",
            Self::Catalog => "catalog",
            Self::Governance => "governance",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Whether the error was raised locally before any request was sent
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed
                | Self::RequiredField
                | Self::InvalidFormat
                | Self::TransitionNotAllowed
                | Self::ReasonRequired
                | Self::ApprovedAmountRequired
                | Self::RejectionReasonRequired
                | Self::QueryTextRequired
                | Self::DeactivationReasonRequired
                | Self::InvalidRulesJson
                | Self::PolicyCodeRequired
                | Self::PolicyNameRequired
                | Self::BranchScopeRequired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Lifecycle);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Billing);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Infrastructure);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Governance);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ReasonRequired.category(), ErrorCategory::Lifecycle);
        assert_eq!(ErrorCode::PreauthNotFound.category(), ErrorCategory::Billing);
        assert_eq!(
            ErrorCode::DeactivationReasonRequired.category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(ErrorCode::PackageNotFound.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::DraftNotFound.category(), ErrorCategory::Governance);
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_client_side_codes() {
        assert!(ErrorCode::ReasonRequired.is_client_side());
        assert!(ErrorCode::RejectionReasonRequired.is_client_side());
        assert!(!ErrorCode::StaleState.is_client_side());
        assert!(!ErrorCode::NetworkError.is_client_side());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Infrastructure).unwrap();
        assert_eq!(json, "\"infrastructure\"");

        let category: ErrorCategory = serde_json::from_str("\"lifecycle\"").unwrap();
        assert_eq!(category, ErrorCategory::Lifecycle);
    }
}
