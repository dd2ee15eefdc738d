//! Units (branch scoped)

use super::{DeactivationEndpoint, ListSource, get_list};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::models::{Unit, UnitCreate, UnitDeactivation, UnitFilter, UnitUpdate};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const UNITS: &str = "/api/infrastructure/units";

/// `/api/infrastructure/units`
pub struct UnitsApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> UnitsApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", UNITS, segment(id))
    }

    pub async fn create(&self, branch_id: &str, payload: &UnitCreate) -> ClientResult<Unit> {
        let path = QueryParams::new().push("branchId", branch_id).append_to(UNITS);
        let created: Unit = self.http.post(&path, payload).await?;
        tracing::info!(id = %created.id, code = %created.code, branch_id, "Unit created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, payload: &UnitUpdate) -> ClientResult<Unit> {
        self.http.patch(&Self::item_path(id), payload).await
    }

    /// `DELETE ?hard=false&cascade=true&reason=`
    pub async fn deactivate(&self, id: &str, params: &UnitDeactivation) -> ClientResult<()> {
        let path = QueryParams::from_filter(params).append_to(&Self::item_path(id));
        let _: IgnoredAny = self.http.delete(&path).await?;
        Ok(())
    }

    /// Reactivation needs no reason
    pub async fn reactivate(&self, id: &str) -> ClientResult<Unit> {
        let body = UnitUpdate {
            is_active: Some(true),
            ..UnitUpdate::default()
        };
        self.update(id, &body).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for UnitsApi<C> {
    type Row = Unit;
    type Filter = UnitFilter;

    async fn list(&self, filter: &UnitFilter) -> ClientResult<Vec<Unit>> {
        let path = QueryParams::from_filter(filter).append_to(UNITS);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<Unit> {
        self.http.get(&Self::item_path(id)).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> DeactivationEndpoint for UnitsApi<C> {
    type Row = Unit;
    const LABEL: &'static str = "Unit";

    async fn post_deactivation(&self, id: &str, reason: &str, cascade: bool) -> ClientResult<()> {
        let params = UnitDeactivation {
            cascade,
            ..UnitDeactivation::soft(reason)
        };
        self.deactivate(id, &params).await
    }

    async fn post_reactivation(&self, id: &str) -> ClientResult<()> {
        self.reactivate(id).await.map(|_| ())
    }
}
