//! Infrastructure resources

use super::{DeactivationEndpoint, ListSource, TransitionEndpoint, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::lifecycle::ResourceState;
use shared::models::{Deactivation, Resource, ResourceFilter, ResourceStateChange, ResourceUpdate};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const RESOURCES: &str = "/api/infrastructure/resources";

/// `/api/infrastructure/resources`
pub struct ResourcesApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> ResourcesApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", RESOURCES, segment(id))
    }

    pub async fn update(&self, id: &str, payload: &ResourceUpdate) -> ClientResult<Resource> {
        self.http.patch(&Self::item_path(id), payload).await
    }

    pub async fn change_state(&self, id: &str, change: &ResourceStateChange) -> ClientResult<()> {
        let path = format!("{}/state", Self::item_path(id));
        post_ignored(self.http.as_ref(), &path, change).await
    }

    /// Reactivation needs no reason
    pub async fn reactivate(&self, id: &str) -> ClientResult<Resource> {
        let body = ResourceUpdate {
            is_active: Some(true),
            ..ResourceUpdate::default()
        };
        self.update(id, &body).await
    }

    /// Soft deactivation; the caller has already checked the reason
    pub async fn deactivate(&self, id: &str, body: &Deactivation) -> ClientResult<()> {
        let path = format!("{}/deactivate", Self::item_path(id));
        post_ignored(self.http.as_ref(), &path, body).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for ResourcesApi<C> {
    type Row = Resource;
    type Filter = ResourceFilter;

    async fn list(&self, filter: &ResourceFilter) -> ClientResult<Vec<Resource>> {
        let path = QueryParams::from_filter(filter).append_to(RESOURCES);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<Resource> {
        self.http.get(&Self::item_path(id)).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> TransitionEndpoint for ResourcesApi<C> {
    type Status = ResourceState;

    async fn post_transition(
        &self,
        id: &str,
        target: ResourceState,
        reason: Option<&str>,
    ) -> ClientResult<()> {
        let change = ResourceStateChange {
            state: target,
            reason: reason.map(str::to_string),
        };
        self.change_state(id, &change).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> DeactivationEndpoint for ResourcesApi<C> {
    type Row = Resource;
    const LABEL: &'static str = "Resource";

    /// Resources have no children; `cascade` does not apply
    async fn post_deactivation(&self, id: &str, reason: &str, _cascade: bool) -> ClientResult<()> {
        self.deactivate(id, &Deactivation::soft(reason)).await
    }

    async fn post_reactivation(&self, id: &str) -> ClientResult<()> {
        self.reactivate(id).await.map(|_| ())
    }
}
