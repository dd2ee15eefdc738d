//! Pre-authorization requests
//!
//! Preauth records move only through dedicated actions (submit, approve,
//! reject); queries are attached without a status change on the client.

use super::{ListSource, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::models::{
    PreauthApprove, PreauthCreate, PreauthFilter, PreauthQueryCreate, PreauthReject,
    PreauthRequest,
};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const PREAUTH: &str = "/api/billing/preauth";

/// `/api/billing/preauth`
pub struct PreauthApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> PreauthApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    fn action_path(id: &str, action: &str) -> String {
        format!("{}/{}/{}", PREAUTH, segment(id), action)
    }

    pub async fn create(&self, payload: &PreauthCreate) -> ClientResult<PreauthRequest> {
        let created: PreauthRequest = self.http.post(PREAUTH, payload).await?;
        tracing::info!(id = %created.id, request_number = %created.request_number, "Preauth created");
        Ok(created)
    }

    pub async fn submit(&self, id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self.http.post_empty(&Self::action_path(id, "submit")).await?;
        Ok(())
    }

    pub async fn approve(&self, id: &str, body: &PreauthApprove) -> ClientResult<()> {
        post_ignored(self.http.as_ref(), &Self::action_path(id, "approve"), body).await
    }

    pub async fn reject(&self, id: &str, body: &PreauthReject) -> ClientResult<()> {
        post_ignored(self.http.as_ref(), &Self::action_path(id, "reject"), body).await
    }

    pub async fn add_query(&self, id: &str, body: &PreauthQueryCreate) -> ClientResult<()> {
        post_ignored(self.http.as_ref(), &Self::action_path(id, "queries"), body).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for PreauthApi<C> {
    type Row = PreauthRequest;
    type Filter = PreauthFilter;

    async fn list(&self, filter: &PreauthFilter) -> ClientResult<Vec<PreauthRequest>> {
        let path = QueryParams::from_filter(filter).append_to(PREAUTH);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<PreauthRequest> {
        self.http.get(&format!("{}/{}", PREAUTH, segment(id))).await
    }
}
