//! String-keyed transition table across all entity types
//!
//! Built once from the typed lifecycles. Lookups with an unrecognised
//! status (or a status of another entity type) yield an empty list.

use super::{CaseStatus, EntityKind, Lifecycle, PackageStatus, PreauthStatus, ResourceState};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static TABLE: LazyLock<TransitionTable> = LazyLock::new(TransitionTable::build);

#[derive(Debug, Default)]
pub struct TransitionTable {
    transitions: HashMap<EntityKind, HashMap<&'static str, Vec<&'static str>>>,
    reason_targets: HashSet<(EntityKind, &'static str)>,
}

impl TransitionTable {
    /// Shared instance
    pub fn global() -> &'static TransitionTable {
        &TABLE
    }

    fn build() -> Self {
        let mut table = Self::default();
        table.register::<CaseStatus>();
        table.register::<PreauthStatus>();
        table.register::<ResourceState>();
        table.register::<PackageStatus>();
        table
    }

    fn register<S: Lifecycle>(&mut self) {
        let rows = self.transitions.entry(S::KIND).or_default();
        for status in S::all() {
            let next = status.allowed_transitions().iter().map(|s| s.wire()).collect();
            rows.insert(status.wire(), next);
            if status.requires_reason() {
                self.reason_targets.insert((S::KIND, status.wire()));
            }
        }
    }

    /// Next statuses for `status`; empty for terminal or unknown statuses
    pub fn allowed(&self, kind: EntityKind, status: &str) -> &[&'static str] {
        self.transitions
            .get(&kind)
            .and_then(|rows| rows.get(status))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn requires_reason(&self, kind: EntityKind, target: &str) -> bool {
        self.reason_targets.contains(&(kind, target))
    }

    /// Whether `status` is a member of the entity's enum
    pub fn knows(&self, kind: EntityKind, status: &str) -> bool {
        self.transitions
            .get(&kind)
            .is_some_and(|rows| rows.contains_key(status))
    }
}

/// `allowed_transitions(kind, status)` over the shared table
pub fn allowed_transitions(kind: EntityKind, status: &str) -> &'static [&'static str] {
    TABLE.allowed(kind, status)
}

/// `requires_reason(kind, target)` over the shared table
pub fn requires_reason(kind: EntityKind, target: &str) -> bool {
    TABLE.requires_reason(kind, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_lookup_matches_typed_tables() {
        assert_eq!(
            allowed_transitions(EntityKind::InsuranceCase, "DRAFT"),
            &["POLICY_VERIFIED", "CANCELLED"]
        );
        assert_eq!(
            allowed_transitions(EntityKind::Resource, "BLOCKED"),
            &["AVAILABLE", "MAINTENANCE", "INACTIVE"]
        );
        assert_eq!(
            allowed_transitions(EntityKind::Preauth, "PREAUTH_RESPONDED"),
            &["PREAUTH_APPROVED", "PREAUTH_REJECTED"]
        );
    }

    #[test]
    fn test_unknown_status_is_empty() {
        assert!(allowed_transitions(EntityKind::InsuranceCase, "UNKNOWN").is_empty());
        assert!(allowed_transitions(EntityKind::InsuranceCase, "").is_empty());
        // Resource status looked up under the case table
        assert!(allowed_transitions(EntityKind::InsuranceCase, "AVAILABLE").is_empty());
    }

    #[test]
    fn test_terminals_are_empty_but_known() {
        let table = TransitionTable::global();
        for (kind, status) in [
            (EntityKind::InsuranceCase, "CLOSED"),
            (EntityKind::InsuranceCase, "CANCELLED"),
            (EntityKind::Resource, "INACTIVE"),
        ] {
            assert!(table.knows(kind, status));
            assert!(table.allowed(kind, status).is_empty());
        }
    }

    #[test]
    fn test_requires_reason_by_kind() {
        assert!(requires_reason(EntityKind::Resource, "RESERVED"));
        assert!(requires_reason(EntityKind::Resource, "BLOCKED"));
        assert!(!requires_reason(EntityKind::Resource, "MAINTENANCE"));
        assert!(!requires_reason(EntityKind::InsuranceCase, "CANCELLED"));
        assert!(!requires_reason(EntityKind::Resource, "NOT_A_STATE"));
    }

    #[test]
    fn test_every_status_registered() {
        let table = TransitionTable::global();
        for status in ResourceState::ALL {
            assert!(table.knows(EntityKind::Resource, status.as_str()));
        }
        for status in PackageStatus::ALL {
            assert!(table.knows(EntityKind::ServicePackage, status.as_str()));
        }
    }
}
