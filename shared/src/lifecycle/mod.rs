//! Entity lifecycles
//!
//! Every stateful record (insurance case, pre-authorization, infrastructure
//! resource, service package) carries a status from a closed enum. The
//! enums implement [`Lifecycle`], which exposes the static transition table
//! and the reason predicate for that entity type. [`TransitionTable`] is the
//! string-keyed view over all of them, used where statuses arrive as raw
//! wire values.
//!
//! These tables are a UX gate only; the backend remains the authority and
//! may still reject a transition the client considered legal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Generates a wire-compatible status enum: serde names, `ALL`, `as_str`,
/// `FromStr` and `Display`.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every status, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::lifecycle::UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::lifecycle::UnknownStatus(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Implements [`Lifecycle`] plumbing shared by every status enum.
macro_rules! lifecycle_basics {
    ($name:ident) => {
        fn all() -> &'static [Self] {
            $name::ALL
        }

        fn wire(&self) -> &'static str {
            self.as_str()
        }

        fn parse(value: &str) -> Option<Self> {
            value.parse().ok()
        }
    };
}

mod case;
mod menu;
mod package;
mod preauth;
mod resource;
mod table;

pub use case::CaseStatus;
pub use menu::{ActionMenu, MenuAction, NO_TRANSITIONS_LABEL, status_label};
pub use package::{PackageStatus, WorkflowAction};
pub use preauth::{PreauthAction, PreauthStatus};
pub use resource::ResourceState;
pub use table::{TransitionTable, allowed_transitions, requires_reason};

/// Entity types that carry a lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    InsuranceCase,
    Preauth,
    Resource,
    ServicePackage,
}

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::InsuranceCase,
        EntityKind::Preauth,
        EntityKind::Resource,
        EntityKind::ServicePackage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InsuranceCase => "insurance case",
            Self::Preauth => "pre-authorization",
            Self::Resource => "resource",
            Self::ServicePackage => "service package",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A status string that is not a member of the entity's enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

/// A closed status enum with a static transition table
pub trait Lifecycle:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Entity type owning this status enum
    const KIND: EntityKind;

    /// Every status of the enum
    fn all() -> &'static [Self];

    /// Wire representation
    fn wire(&self) -> &'static str;

    /// Parse a wire value; unknown values yield `None`
    fn parse(value: &str) -> Option<Self>;

    /// Ordered list of statuses reachable from `self`
    fn allowed_transitions(&self) -> &'static [Self];

    /// Whether entering `self` needs a free-text reason
    fn requires_reason(&self) -> bool {
        false
    }

    /// No transitions leave this status
    fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    fn can_transition_to(&self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Human label: underscores become spaces
    fn label(&self) -> String {
        status_label(self.wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed_over_own_enum<S: Lifecycle>() {
        for status in S::all() {
            for next in status.allowed_transitions() {
                assert!(S::all().contains(next), "{} -> {} escapes enum", status, next);
                assert_ne!(status, next, "{} lists itself", status);
            }
        }
    }

    #[test]
    fn test_tables_stay_within_own_enum() {
        assert_closed_over_own_enum::<CaseStatus>();
        assert_closed_over_own_enum::<PreauthStatus>();
        assert_closed_over_own_enum::<ResourceState>();
        assert_closed_over_own_enum::<PackageStatus>();
    }

    #[test]
    fn test_documented_terminals_are_empty() {
        assert!(CaseStatus::Closed.allowed_transitions().is_empty());
        assert!(CaseStatus::Cancelled.allowed_transitions().is_empty());
        assert!(ResourceState::Inactive.allowed_transitions().is_empty());
        assert!(PackageStatus::Retired.allowed_transitions().is_empty());
        assert!(CaseStatus::Closed.is_terminal());
        assert!(!CaseStatus::Draft.is_terminal());
    }

    #[test]
    fn test_parse_unknown_status() {
        assert_eq!(CaseStatus::parse("NOPE"), None);
        assert_eq!(
            "NOPE".parse::<ResourceState>(),
            Err(UnknownStatus("NOPE".to_string()))
        );
        assert_eq!(ResourceState::parse("BLOCKED"), Some(ResourceState::Blocked));
    }

    #[test]
    fn test_label_replaces_underscores() {
        assert_eq!(CaseStatus::PolicyVerified.label(), "POLICY VERIFIED");
        assert_eq!(ResourceState::Available.label(), "AVAILABLE");
    }

    #[test]
    fn test_wire_round_trips_through_serde() {
        for status in CaseStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Resource.to_string(), "resource");
        assert_eq!(EntityKind::ALL.len(), 4);
    }
}
