//! Service package curation workflow

use super::{EntityKind, Lifecycle};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Service package status
    pub enum PackageStatus {
        Draft => "DRAFT",
        InReview => "IN_REVIEW",
        Approved => "APPROVED",
        Published => "PUBLISHED",
        Retired => "RETIRED",
    }
}

impl Lifecycle for PackageStatus {
    const KIND: EntityKind = EntityKind::ServicePackage;

    lifecycle_basics!(PackageStatus);

    fn allowed_transitions(&self) -> &'static [Self] {
        use PackageStatus::*;
        match self {
            Draft => &[InReview, Retired],
            InReview => &[Approved, Retired],
            Approved => &[Published, Retired],
            Published => &[Retired],
            Retired => &[],
        }
    }
}

/// Workflow endpoint actions: `.../workflow/{submit|approve|publish|retire}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowAction {
    Submit,
    Approve,
    Publish,
    Retire,
}

impl WorkflowAction {
    pub const ALL: &'static [WorkflowAction] =
        &[Self::Submit, Self::Approve, Self::Publish, Self::Retire];

    /// Path segment used by the workflow endpoint
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Publish => "publish",
            Self::Retire => "retire",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit for review",
            Self::Approve => "Approve",
            Self::Publish => "Publish",
            Self::Retire => "Retire",
        }
    }

    pub fn target(&self) -> PackageStatus {
        match self {
            Self::Submit => PackageStatus::InReview,
            Self::Approve => PackageStatus::Approved,
            Self::Publish => PackageStatus::Published,
            Self::Retire => PackageStatus::Retired,
        }
    }

    /// Actions suggested for `status`, following the curation order. Display
    /// hint only; the backend accepts every action in every status.
    pub fn available_for(status: PackageStatus) -> Vec<WorkflowAction> {
        Self::ALL
            .iter()
            .copied()
            .filter(|a| status.can_transition_to(a.target()))
            .collect()
    }
}

impl std::str::FromStr for WorkflowAction {
    type Err = super::UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_path().eq_ignore_ascii_case(s))
            .ok_or_else(|| super::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_order() {
        use WorkflowAction::*;
        assert_eq!(
            WorkflowAction::available_for(PackageStatus::Draft),
            vec![Submit, Retire]
        );
        assert_eq!(
            WorkflowAction::available_for(PackageStatus::InReview),
            vec![Approve, Retire]
        );
        assert_eq!(
            WorkflowAction::available_for(PackageStatus::Approved),
            vec![Publish, Retire]
        );
        assert_eq!(
            WorkflowAction::available_for(PackageStatus::Published),
            vec![Retire]
        );
        assert!(WorkflowAction::available_for(PackageStatus::Retired).is_empty());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("publish".parse::<WorkflowAction>(), Ok(WorkflowAction::Publish));
        assert_eq!("RETIRE".parse::<WorkflowAction>(), Ok(WorkflowAction::Retire));
        assert!("archive".parse::<WorkflowAction>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(WorkflowAction::Submit.label(), "Submit for review");
        assert_eq!(WorkflowAction::Submit.as_path(), "submit");
    }
}
