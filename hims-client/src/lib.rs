//! HIMS Client - REST client for the hospital administration backend
//!
//! Typed endpoint clients over one [`HttpClient`], a list/detail
//! [`ListBinder`] with debounced, sequence-tagged reloads, and the
//! confirm-then-patch flows that move records through their lifecycles.

pub mod actions;
pub mod api;
pub mod binder;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod transition;

pub use actions::{DeactivationFlow, PreauthFlow};
pub use api::{DeactivationEndpoint, HimsClient, ListSource, TransitionEndpoint};
pub use binder::{ListBinder, LoadPhase};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use transition::{TransitionFlow, WorkflowFlow, check_transition};
