//! Action menu builder

use super::Lifecycle;
use serde::Serialize;

/// Placeholder shown when a status has no outgoing transitions
pub const NO_TRANSITIONS_LABEL: &str = "No transitions available";

/// Display label for a wire status: underscores become spaces
pub fn status_label(status: &str) -> String {
    status.replace('_', " ")
}

/// One entry of an action menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAction<S> {
    /// `None` for the disabled placeholder
    pub target: Option<S>,
    pub label: String,
    pub enabled: bool,
    /// Submission must capture a reason first
    pub requires_reason: bool,
}

/// Ordered list of transition actions for a record's current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionMenu<S> {
    pub items: Vec<MenuAction<S>>,
}

impl<S: Lifecycle> ActionMenu<S> {
    /// Build the menu for `current`. Pure; invoking an entry is the caller's job.
    pub fn for_status(current: S) -> Self {
        let items: Vec<_> = current
            .allowed_transitions()
            .iter()
            .map(|target| MenuAction {
                target: Some(*target),
                label: target.label(),
                enabled: true,
                requires_reason: target.requires_reason(),
            })
            .collect();

        if items.is_empty() {
            return Self {
                items: vec![MenuAction {
                    target: None,
                    label: NO_TRANSITIONS_LABEL.to_string(),
                    enabled: false,
                    requires_reason: false,
                }],
            };
        }

        Self { items }
    }

    /// Only the disabled placeholder is present
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|i| !i.enabled)
    }

    pub fn contains(&self, target: S) -> bool {
        self.items.iter().any(|i| i.target == Some(target))
    }

    pub fn targets(&self) -> Vec<S> {
        self.items.iter().filter_map(|i| i.target).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}
