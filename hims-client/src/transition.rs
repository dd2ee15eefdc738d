//! Transition submission
//!
//! Every status change goes through the same steps: a local gate against
//! the transition table and the reason predicate, one POST, then a patch of
//! the local copies once the server confirmed. A rejected gate sends
//! nothing; a failed POST leaves local state untouched and surfaces the
//! server message. Nothing is retried.

use crate::api::{ListSource, PackagesApi, TransitionEndpoint};
use crate::binder::ListBinder;
use crate::notify::{Notice, Notifier};
use crate::{ClientError, ClientResult, HttpClient};
use shared::form;
use shared::lifecycle::{ActionMenu, Lifecycle, WorkflowAction};
use shared::models::{ServicePackage, StatefulRecord};
use shared::AppError;
use std::sync::Arc;

/// Local gate for moving from `current` to `target`
///
/// Returns the trimmed reason to send (`None` when blank or absent).
pub fn check_transition<S: Lifecycle>(
    current: S,
    target: S,
    reason: Option<&str>,
) -> ClientResult<Option<String>> {
    if !current.can_transition_to(target) {
        return Err(ClientError::TransitionNotAllowed {
            from: current.wire().to_string(),
            to: target.wire().to_string(),
        });
    }
    let reason = form::optional_text_opt(reason);
    if target.requires_reason() && reason.is_none() {
        return Err(AppError::reason_required(target.wire()).into());
    }
    Ok(reason)
}

/// Current status of a record the binder holds, or a local not-found error
pub(crate) async fn loaded_status<S>(
    binder: &ListBinder<S>,
    id: &str,
) -> ClientResult<<S::Row as StatefulRecord>::Status>
where
    S: ListSource,
    S::Row: StatefulRecord,
{
    binder.status_of(id).await.ok_or_else(|| {
        AppError::not_found(format!(
            "{} {}",
            <<S::Row as StatefulRecord>::Status as Lifecycle>::KIND,
            id
        ))
        .into()
    })
}

/// Generic transition flow over a [`TransitionEndpoint`]
pub struct TransitionFlow<E> {
    endpoint: Arc<E>,
    notifier: Arc<dyn Notifier>,
}

impl<E: TransitionEndpoint> TransitionFlow<E> {
    pub fn new(endpoint: Arc<E>, notifier: Arc<dyn Notifier>) -> Self {
        Self { endpoint, notifier }
    }

    /// Menu of transitions offered for `current`
    pub fn menu(current: E::Status) -> ActionMenu<E::Status> {
        ActionMenu::for_status(current)
    }

    /// Move record `id` held by `binder` to `target`
    pub async fn submit<S>(
        &self,
        binder: &ListBinder<S>,
        id: &str,
        target: E::Status,
        reason: Option<&str>,
    ) -> ClientResult<()>
    where
        S: ListSource,
        S::Row: StatefulRecord<Status = E::Status>,
    {
        let gated = async {
            let current = loaded_status(binder, id).await?;
            check_transition(current, target, reason)
        };
        let reason = match gated.await {
            Ok(reason) => reason,
            Err(e) => {
                tracing::debug!(id, target = %target, error = %e, "Transition blocked locally");
                self.notifier.notify(Notice::error("Validation", e.to_string()));
                return Err(e);
            }
        };

        if let Err(e) = self
            .endpoint
            .post_transition(id, target, reason.as_deref())
            .await
        {
            tracing::warn!(id, target = %target, error = %e, "Transition failed");
            self.notifier
                .notify(Notice::error("Transition failed", e.to_string()));
            return Err(e);
        }

        binder.patch_status(id, target).await;
        let kind = <E::Status as Lifecycle>::KIND;
        tracing::info!(%kind, id, status = %target, "Status updated");
        self.notifier.notify(Notice::success(
            "Status updated",
            format!("Moved to {}.", target.label()),
        ));
        Ok(())
    }
}

/// Package review workflow (submit / approve / publish / retire)
///
/// Every action is offered in every status and the backend decides; there
/// is no local gate. [`WorkflowAction::available_for`] is only a hint.
pub struct WorkflowFlow<C> {
    api: Arc<PackagesApi<C>>,
    notifier: Arc<dyn Notifier>,
}

impl<C: HttpClient + 'static> WorkflowFlow<C> {
    pub fn new(api: Arc<PackagesApi<C>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Run `action` on package `id`, then reload the list. The note is
    /// trimmed and left out when blank.
    pub async fn run<S>(
        &self,
        binder: &ListBinder<S>,
        id: &str,
        action: WorkflowAction,
        note: Option<&str>,
    ) -> ClientResult<()>
    where
        S: ListSource<Row = ServicePackage>,
    {
        if let Err(e) = self.api.workflow(id, action, note).await {
            tracing::warn!(id, action = action.as_path(), error = %e, "Workflow action failed");
            self.notifier
                .notify(Notice::error("Workflow failed", e.to_string()));
            return Err(e);
        }

        binder.patch_status(id, action.target()).await;
        tracing::info!(id, action = action.as_path(), "Workflow updated");
        self.notifier.notify(Notice::success(
            "Workflow updated",
            format!("Action {} applied.", action.as_path().to_uppercase()),
        ));
        // Publishing also bumps the version; the list shows the server copy
        let _ = binder.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::lifecycle::{CaseStatus, PackageStatus, ResourceState};

    #[test]
    fn test_gate_allows_table_moves() {
        assert_eq!(
            check_transition(CaseStatus::Draft, CaseStatus::PolicyVerified, None).unwrap(),
            None
        );
        assert_eq!(
            check_transition(
                ResourceState::Available,
                ResourceState::Blocked,
                Some("  Pipe leak  ")
            )
            .unwrap(),
            Some("Pipe leak".to_string())
        );
    }

    #[test]
    fn test_gate_rejects_unlisted_target() {
        let err = check_transition(CaseStatus::Draft, CaseStatus::Settled, None).unwrap_err();
        assert!(matches!(err, ClientError::TransitionNotAllowed { .. }));
        assert_eq!(err.to_string(), "Cannot move from DRAFT to SETTLED");

        let err = check_transition(PackageStatus::Retired, PackageStatus::Published, None)
            .unwrap_err();
        assert!(err.is_local());
    }

    #[test]
    fn test_gate_requires_reason() {
        for reason in [None, Some(""), Some("   ")] {
            let err = check_transition(ResourceState::Available, ResourceState::Reserved, reason)
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::ReasonRequired);
            assert_eq!(err.to_string(), "Reason is required for this state");
        }
        // Non-gated targets ignore a missing reason
        assert!(
            check_transition(ResourceState::Available, ResourceState::Maintenance, None).is_ok()
        );
    }
}
