//! Service packages, their components and the review workflow

use super::{ListSource, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::form;
use shared::lifecycle::WorkflowAction;
use shared::models::{
    PackageComponentUpsert, PackageFilter, ServicePackage, ServicePackageUpsert, WorkflowNote,
};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const PACKAGES: &str = "/api/infrastructure/service-packages";

/// `/api/infrastructure/service-packages`
pub struct PackagesApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> PackagesApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", PACKAGES, segment(id))
    }

    pub async fn create(
        &self,
        branch_id: &str,
        payload: &ServicePackageUpsert,
    ) -> ClientResult<ServicePackage> {
        let path = QueryParams::new()
            .push("branchId", branch_id)
            .append_to(PACKAGES);
        let created: ServicePackage = self.http.post(&path, payload).await?;
        tracing::info!(id = %created.id, code = %created.code, "Service package created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &ServicePackageUpsert,
    ) -> ClientResult<ServicePackage> {
        self.http.patch(&Self::item_path(id), payload).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self.http.delete(&Self::item_path(id)).await?;
        Ok(())
    }

    /// Insert or update the component for its service item
    pub async fn upsert_component(
        &self,
        id: &str,
        component: &PackageComponentUpsert,
    ) -> ClientResult<()> {
        let path = format!("{}/components", Self::item_path(id));
        post_ignored(self.http.as_ref(), &path, component).await
    }

    /// Build a component from raw form input and save it. Invalid rules
    /// JSON is rejected before anything is sent.
    pub async fn save_component_form(
        &self,
        id: &str,
        service_item_id: &str,
        quantity: u32,
        is_included: bool,
        rules_text: &str,
    ) -> ClientResult<PackageComponentUpsert> {
        let service_item_id = form::required_text(service_item_id, "Service item")?;
        let rules = form::parse_json_field(rules_text)?;
        let component =
            PackageComponentUpsert::new(service_item_id, quantity, is_included).with_rules(rules);
        self.upsert_component(id, &component).await?;
        Ok(component)
    }

    pub async fn remove_component(&self, id: &str, service_item_id: &str) -> ClientResult<()> {
        let path = format!(
            "{}/components/{}",
            Self::item_path(id),
            segment(service_item_id)
        );
        let _: IgnoredAny = self.http.delete(&path).await?;
        Ok(())
    }

    /// `POST .../workflow/{action}`; a blank note is not sent
    pub async fn workflow(
        &self,
        id: &str,
        action: WorkflowAction,
        note: Option<&str>,
    ) -> ClientResult<()> {
        let path = format!("{}/workflow/{}", Self::item_path(id), action.as_path());
        let body = WorkflowNote {
            note: form::optional_text_opt(note),
        };
        post_ignored(self.http.as_ref(), &path, &body).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for PackagesApi<C> {
    type Row = ServicePackage;
    type Filter = PackageFilter;

    async fn list(&self, filter: &PackageFilter) -> ClientResult<Vec<ServicePackage>> {
        let path = QueryParams::from_filter(filter).append_to(PACKAGES);
        let rows = get_list(self.http.as_ref(), &path).await?;
        Ok(filter.visible(rows))
    }

    async fn fetch(&self, id: &str) -> ClientResult<ServicePackage> {
        self.http.get(&Self::item_path(id)).await
    }
}
