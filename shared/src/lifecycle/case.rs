//! Insurance case lifecycle

use super::{EntityKind, Lifecycle};

status_enum! {
    /// Insurance case status
    pub enum CaseStatus {
        Draft => "DRAFT",
        PolicyVerified => "POLICY_VERIFIED",
        PreauthPending => "PREAUTH_PENDING",
        PreauthApproved => "PREAUTH_APPROVED",
        Admitted => "ADMITTED",
        DischargePending => "DISCHARGE_PENDING",
        ClaimSubmitted => "CLAIM_SUBMITTED",
        ClaimApproved => "CLAIM_APPROVED",
        Settled => "SETTLED",
        Closed => "CLOSED",
        Cancelled => "CANCELLED",
    }
}

impl CaseStatus {
    /// Counted as open on the case dashboard
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed | Self::Cancelled)
    }
}

impl Lifecycle for CaseStatus {
    const KIND: EntityKind = EntityKind::InsuranceCase;

    lifecycle_basics!(CaseStatus);

    fn allowed_transitions(&self) -> &'static [Self] {
        use CaseStatus::*;
        match self {
            Draft => &[PolicyVerified, Cancelled],
            PolicyVerified => &[PreauthPending, Admitted, Cancelled],
            PreauthPending => &[PreauthApproved, Cancelled],
            PreauthApproved => &[Admitted, Cancelled],
            Admitted => &[DischargePending],
            DischargePending => &[ClaimSubmitted],
            ClaimSubmitted => &[ClaimApproved, Cancelled],
            ClaimApproved => &[Settled],
            Settled => &[Closed],
            Closed | Cancelled => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_transitions() {
        assert_eq!(
            CaseStatus::Draft.allowed_transitions(),
            &[CaseStatus::PolicyVerified, CaseStatus::Cancelled]
        );
        assert!(CaseStatus::Draft.can_transition_to(CaseStatus::PolicyVerified));
        assert!(!CaseStatus::Draft.can_transition_to(CaseStatus::Settled));
    }

    #[test]
    fn test_full_table() {
        use CaseStatus::*;
        let expected: &[(CaseStatus, &[CaseStatus])] = &[
            (Draft, &[PolicyVerified, Cancelled]),
            (PolicyVerified, &[PreauthPending, Admitted, Cancelled]),
            (PreauthPending, &[PreauthApproved, Cancelled]),
            (PreauthApproved, &[Admitted, Cancelled]),
            (Admitted, &[DischargePending]),
            (DischargePending, &[ClaimSubmitted]),
            (ClaimSubmitted, &[ClaimApproved, Cancelled]),
            (ClaimApproved, &[Settled]),
            (Settled, &[Closed]),
            (Closed, &[]),
            (Cancelled, &[]),
        ];
        assert_eq!(expected.len(), CaseStatus::ALL.len());
        for (from, to) in expected {
            assert_eq!(from.allowed_transitions(), *to, "row {}", from);
        }
    }

    #[test]
    fn test_no_reason_required() {
        assert!(CaseStatus::ALL.iter().all(|s| !s.requires_reason()));
    }

    #[test]
    fn test_is_open() {
        assert!(CaseStatus::Draft.is_open());
        assert!(CaseStatus::Settled.is_open());
        assert!(!CaseStatus::Closed.is_open());
        assert!(!CaseStatus::Cancelled.is_open());
    }
}
