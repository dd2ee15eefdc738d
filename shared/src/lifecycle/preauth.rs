//! Pre-authorization lifecycle
//!
//! Pre-authorizations do not use a generic transition endpoint. Each move is
//! a dedicated action (submit, approve, reject, add query); the table below
//! mirrors which statuses those actions are offered from.

use super::{EntityKind, Lifecycle};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Pre-authorization request status
    pub enum PreauthStatus {
        Draft => "PREAUTH_DRAFT",
        Submitted => "PREAUTH_SUBMITTED",
        QueryRaised => "PREAUTH_QUERY_RAISED",
        Responded => "PREAUTH_RESPONDED",
        Approved => "PREAUTH_APPROVED",
        Rejected => "PREAUTH_REJECTED",
        EnhancementRequested => "PREAUTH_ENHANCEMENT_REQUESTED",
        EnhancementApproved => "PREAUTH_ENHANCEMENT_APPROVED",
        Expired => "PREAUTH_EXPIRED",
    }
}

impl PreauthStatus {
    /// Awaiting a payer decision
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Submitted | Self::QueryRaised | Self::Responded)
    }

    /// Approved, including approved enhancements
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved | Self::EnhancementApproved)
    }
}

impl Lifecycle for PreauthStatus {
    const KIND: EntityKind = EntityKind::Preauth;

    lifecycle_basics!(PreauthStatus);

    fn allowed_transitions(&self) -> &'static [Self] {
        use PreauthStatus::*;
        match self {
            Draft => &[Submitted],
            Submitted | Responded => &[Approved, Rejected],
            QueryRaised | Approved | Rejected | EnhancementRequested | EnhancementApproved
            | Expired => &[],
        }
    }
}

/// Dedicated pre-authorization actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreauthAction {
    Submit,
    Approve,
    Reject,
    AddQuery,
}

impl PreauthAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::AddQuery => "Add Query",
        }
    }

    /// Status the record lands in after the action succeeds, if it moves
    pub fn target(&self) -> Option<PreauthStatus> {
        match self {
            Self::Submit => Some(PreauthStatus::Submitted),
            Self::Approve => Some(PreauthStatus::Approved),
            Self::Reject => Some(PreauthStatus::Rejected),
            Self::AddQuery => None,
        }
    }

    /// Actions offered for a record in `status`
    ///
    /// Status-moving actions follow the transition table; adding a query is
    /// always available.
    pub fn available_for(status: PreauthStatus) -> Vec<PreauthAction> {
        let mut actions: Vec<_> = [Self::Submit, Self::Approve, Self::Reject]
            .into_iter()
            .filter(|a| a.target().is_some_and(|t| status.can_transition_to(t)))
            .collect();
        actions.push(Self::AddQuery);
        actions
    }
}
