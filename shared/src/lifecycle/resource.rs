//! Infrastructure resource lifecycle

use super::{EntityKind, Lifecycle};

status_enum! {
    /// Current state of a bed, chair, table or other schedulable resource
    pub enum ResourceState {
        Available => "AVAILABLE",
        Reserved => "RESERVED",
        Occupied => "OCCUPIED",
        Cleaning => "CLEANING",
        Sanitization => "SANITIZATION",
        Maintenance => "MAINTENANCE",
        Blocked => "BLOCKED",
        Inactive => "INACTIVE",
    }
}

impl ResourceState {
    /// Only available resources may be scheduled
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl Lifecycle for ResourceState {
    const KIND: EntityKind = EntityKind::Resource;

    lifecycle_basics!(ResourceState);

    fn allowed_transitions(&self) -> &'static [Self] {
        use ResourceState::*;
        match self {
            Available => &[Occupied, Reserved, Maintenance, Blocked, Inactive],
            Reserved => &[Available, Occupied, Maintenance, Blocked, Inactive],
            Occupied => &[Cleaning, Sanitization, Maintenance, Blocked, Inactive],
            Cleaning => &[Available, Maintenance, Blocked, Inactive],
            Sanitization => &[Available, Maintenance, Blocked, Inactive],
            Maintenance => &[Available, Blocked, Inactive],
            Blocked => &[Available, Maintenance, Inactive],
            Inactive => &[],
        }
    }

    fn requires_reason(&self) -> bool {
        matches!(self, Self::Reserved | Self::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_table() {
        use ResourceState::*;
        let expected: &[(ResourceState, &[ResourceState])] = &[
            (Available, &[Occupied, Reserved, Maintenance, Blocked, Inactive]),
            (Reserved, &[Available, Occupied, Maintenance, Blocked, Inactive]),
            (Occupied, &[Cleaning, Sanitization, Maintenance, Blocked, Inactive]),
            (Cleaning, &[Available, Maintenance, Blocked, Inactive]),
            (Sanitization, &[Available, Maintenance, Blocked, Inactive]),
            (Maintenance, &[Available, Blocked, Inactive]),
            (Blocked, &[Available, Maintenance, Inactive]),
            (Inactive, &[]),
        ];
        assert_eq!(expected.len(), ResourceState::ALL.len());
        for (from, to) in expected {
            assert_eq!(from.allowed_transitions(), *to, "row {}", from);
        }
    }

    #[test]
    fn test_requires_reason_exactly_reserved_and_blocked() {
        let gated: Vec<_> = ResourceState::ALL
            .iter()
            .copied()
            .filter(|s| s.requires_reason())
            .collect();
        assert_eq!(gated, vec![ResourceState::Reserved, ResourceState::Blocked]);
    }

    #[test]
    fn test_only_available_is_bookable() {
        let bookable: Vec<_> = ResourceState::ALL
            .iter()
            .copied()
            .filter(|s| s.is_bookable())
            .collect();
        assert_eq!(bookable, vec![ResourceState::Available]);
    }

    #[test]
    fn test_serde_wire_names() {
        let state: ResourceState = serde_json::from_str("\"SANITIZATION\"").unwrap();
        assert_eq!(state, ResourceState::Sanitization);
        assert!(serde_json::from_str::<ResourceState>("\"BROKEN\"").is_err());
    }
}
