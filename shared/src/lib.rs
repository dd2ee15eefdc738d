//! Shared types for the hospital administration client
//!
//! Pure domain layer used by the REST client and the console: status
//! lifecycles and their transition tables, entity models and request
//! payloads, error codes, query parameters and response envelopes.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod form;
pub mod lifecycle;
pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use http;
pub use lifecycle::{EntityKind, Lifecycle};
pub use serde::{Deserialize, Serialize};
