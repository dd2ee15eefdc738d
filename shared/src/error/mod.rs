//! Unified error system for the hospital administration client
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / branch scope errors
//! - 3xxx: Lifecycle errors
//! - 4xxx: Billing errors
//! - 5xxx: Infrastructure errors
//! - 6xxx: Catalog errors
//! - 7xxx: Governance errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ReasonRequired);
//! assert_eq!(err.message, "Reason is required for this state");
//!
//! let err = AppError::validation("Select a state").with_detail("field", "state");
//! assert_eq!(err.detail_str("field"), Some("state"));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
