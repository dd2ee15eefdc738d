//! Dedicated record actions
//!
//! Pre-authorization decisions and soft deactivation do not go through a
//! generic transition endpoint. Each action validates its form input first,
//! then the transition table, sends one request and only then touches the
//! local copies.

use crate::api::{DeactivationEndpoint, ListSource, PreauthApi};
use crate::binder::ListBinder;
use crate::notify::{Notice, Notifier};
use crate::transition::{check_transition, loaded_status};
use crate::{ClientError, ClientResult, HttpClient};
use shared::form::{self, MAX_NOTE_LEN};
use shared::lifecycle::PreauthStatus;
use shared::models::{
    PreauthApprove, PreauthQueryCreate, PreauthReject, PreauthRequest, QuerySource,
};
use shared::{AppError, ErrorCode};
use std::sync::Arc;

/// Submit / approve / reject / add-query on pre-authorizations
pub struct PreauthFlow<C> {
    api: Arc<PreauthApi<C>>,
    notifier: Arc<dyn Notifier>,
}

impl<C: HttpClient + 'static> PreauthFlow<C> {
    pub fn new(api: Arc<PreauthApi<C>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn invalid<T>(&self, e: impl Into<ClientError>) -> ClientResult<T> {
        let e = e.into();
        self.notifier.notify(Notice::error("Validation", e.to_string()));
        Err(e)
    }

    async fn gate<S>(&self, binder: &ListBinder<S>, id: &str, target: PreauthStatus) -> ClientResult<()>
    where
        S: ListSource<Row = PreauthRequest>,
    {
        let current = loaded_status(binder, id).await?;
        check_transition(current, target, None).map(|_| ())
    }

    pub async fn submit<S>(&self, binder: &ListBinder<S>, id: &str) -> ClientResult<()>
    where
        S: ListSource<Row = PreauthRequest>,
    {
        if let Err(e) = self.gate(binder, id, PreauthStatus::Submitted).await {
            return self.invalid(e);
        }
        if let Err(e) = self.api.submit(id).await {
            tracing::warn!(id, error = %e, "Preauth submit failed");
            self.notifier.notify(Notice::error("Submit failed", e.to_string()));
            return Err(e);
        }
        binder.patch_status(id, PreauthStatus::Submitted).await;
        tracing::info!(id, "Preauth submitted");
        self.notifier.notify(Notice::success("Preauth submitted", ""));
        Ok(())
    }

    /// `amount` is the raw form text; `valid_till` is left out when blank
    pub async fn approve<S>(
        &self,
        binder: &ListBinder<S>,
        id: &str,
        amount: &str,
        valid_till: Option<&str>,
    ) -> ClientResult<()>
    where
        S: ListSource<Row = PreauthRequest>,
    {
        let approved_amount =
            match form::required_amount(amount, "Approved amount", ErrorCode::ApprovedAmountRequired) {
                Ok(v) => v,
                Err(e) => return self.invalid(e),
            };
        if let Err(e) = self.gate(binder, id, PreauthStatus::Approved).await {
            return self.invalid(e);
        }

        let body = PreauthApprove {
            approved_amount,
            valid_till: form::optional_text_opt(valid_till),
        };
        if let Err(e) = self.api.approve(id, &body).await {
            tracing::warn!(id, error = %e, "Preauth approve failed");
            self.notifier.notify(Notice::error("Approve failed", e.to_string()));
            return Err(e);
        }
        binder.patch_status(id, PreauthStatus::Approved).await;
        tracing::info!(id, amount = %approved_amount, "Preauth approved");
        self.notifier.notify(Notice::success("Preauth approved", ""));
        Ok(())
    }

    pub async fn reject<S>(&self, binder: &ListBinder<S>, id: &str, reason: &str) -> ClientResult<()>
    where
        S: ListSource<Row = PreauthRequest>,
    {
        let Some(rejection_reason) = form::optional_text(reason) else {
            return self.invalid(AppError::new(ErrorCode::RejectionReasonRequired));
        };
        if let Err(e) = form::bounded_text(&rejection_reason, "Rejection reason", MAX_NOTE_LEN) {
            return self.invalid(e);
        }
        if let Err(e) = self.gate(binder, id, PreauthStatus::Rejected).await {
            return self.invalid(e);
        }

        let body = PreauthReject { rejection_reason };
        if let Err(e) = self.api.reject(id, &body).await {
            tracing::warn!(id, error = %e, "Preauth reject failed");
            self.notifier.notify(Notice::error("Reject failed", e.to_string()));
            return Err(e);
        }
        binder.patch_status(id, PreauthStatus::Rejected).await;
        tracing::info!(id, "Preauth rejected");
        self.notifier.notify(Notice::success("Preauth rejected", ""));
        Ok(())
    }

    /// Attach a query. The server decides the resulting status, so the list
    /// is reloaded instead of patched.
    pub async fn add_query<S>(
        &self,
        binder: &ListBinder<S>,
        id: &str,
        text: &str,
        source: QuerySource,
        deadline: Option<&str>,
    ) -> ClientResult<()>
    where
        S: ListSource<Row = PreauthRequest>,
    {
        let Some(query_text) = form::optional_text(text) else {
            return self.invalid(AppError::new(ErrorCode::QueryTextRequired));
        };
        if let Err(e) = form::bounded_text(&query_text, "Query text", MAX_NOTE_LEN) {
            return self.invalid(e);
        }

        let body = PreauthQueryCreate {
            query_text,
            query_source: source,
            deadline: form::optional_text_opt(deadline),
        };
        if let Err(e) = self.api.add_query(id, &body).await {
            tracing::warn!(id, error = %e, "Preauth query failed");
            self.notifier.notify(Notice::error("Add query failed", e.to_string()));
            return Err(e);
        }
        tracing::info!(id, source = ?source, "Preauth query added");
        self.notifier.notify(Notice::success("Query added", ""));
        // Load failures are notified by the binder
        let _ = binder.refresh().await;
        Ok(())
    }
}

/// Soft deactivation and reactivation of resources, rooms and units
pub struct DeactivationFlow<E> {
    endpoint: Arc<E>,
    notifier: Arc<dyn Notifier>,
    cascade: bool,
}

impl<E: DeactivationEndpoint> DeactivationFlow<E> {
    /// Deactivations cascade to child records unless turned off
    pub fn new(endpoint: Arc<E>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            endpoint,
            notifier,
            cascade: true,
        }
    }

    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Deactivate `id`; a blank reason sends nothing
    pub async fn deactivate<S>(&self, binder: &ListBinder<S>, id: &str, reason: &str) -> ClientResult<()>
    where
        S: ListSource<Row = E::Row>,
    {
        let Some(reason) = form::optional_text(reason) else {
            let e = AppError::new(ErrorCode::DeactivationReasonRequired);
            self.notifier.notify(Notice::error(
                "Reason required",
                "Please provide a deactivation reason.",
            ));
            return Err(e.into());
        };
        if let Err(e) = form::bounded_text(&reason, "Deactivation reason", MAX_NOTE_LEN) {
            self.notifier.notify(Notice::error("Validation", e.to_string()));
            return Err(e.into());
        }

        if let Err(e) = self
            .endpoint
            .post_deactivation(id, &reason, self.cascade)
            .await
        {
            tracing::warn!(kind = E::LABEL, id, error = %e, "Deactivation failed");
            self.notifier
                .notify(Notice::error("Deactivation failed", e.to_string()));
            return Err(e);
        }
        binder.mark_inactive(id).await;
        tracing::info!(kind = E::LABEL, id, %reason, cascade = self.cascade, "Deactivated");
        self.notifier
            .notify(Notice::success(format!("{} deactivated", E::LABEL), ""));
        Ok(())
    }

    /// Reactivate `id` and reload the list
    pub async fn reactivate<S>(&self, binder: &ListBinder<S>, id: &str) -> ClientResult<()>
    where
        S: ListSource<Row = E::Row>,
    {
        if let Err(e) = self.endpoint.post_reactivation(id).await {
            tracing::warn!(kind = E::LABEL, id, error = %e, "Reactivation failed");
            self.notifier
                .notify(Notice::error("Reactivation failed", e.to_string()));
            return Err(e);
        }
        tracing::info!(kind = E::LABEL, id, "Reactivated");
        self.notifier
            .notify(Notice::success(format!("{} activated", E::LABEL), ""));
        let _ = binder.refresh().await;
        Ok(())
    }
}
