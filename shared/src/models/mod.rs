//! Data models
//!
//! Entity rows as returned by the administration API and the request
//! payloads sent back to it. Field names follow the API (camelCase).
//! Optional payload fields are skipped when `None`, so a blank form field
//! is never sent as `""` or `0`.

pub mod branch;
pub mod governance;
pub mod insurance_case;
pub mod insurance_policy;
pub mod policy_template;
pub mod preauth;
pub mod resource;
pub mod room;
pub mod service_library;
pub mod service_package;
pub mod unit;

// Re-exports
pub use branch::*;
pub use governance::*;
pub use insurance_case::*;
pub use insurance_policy::*;
pub use policy_template::*;
pub use preauth::*;
pub use resource::*;
pub use room::*;
pub use service_library::*;
pub use service_package::*;
pub use unit::*;

use crate::lifecycle::Lifecycle;
use serde::{Deserialize, Serialize};

/// Any server row addressed by an opaque, server-assigned id
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// A record whose lifecycle is expressed through a status enum
pub trait StatefulRecord: Record {
    type Status: Lifecycle;

    fn status(&self) -> Self::Status;

    /// Apply a server-confirmed status; other fields are left alone
    fn set_status(&mut self, status: Self::Status);
}

/// A record that is soft-deactivated with a reason and can be reactivated
pub trait Deactivatable: Record {
    fn is_active(&self) -> bool;

    /// Apply a server-confirmed soft deactivation
    fn mark_inactive(&mut self);
}

/// Reference to a linked patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    #[serde(default)]
    pub id: Option<String>,
    pub uhid: String,
    pub name: String,
}

/// Reference to a linked payer (insurer / TPA)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerRef {
    #[serde(default)]
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
}
