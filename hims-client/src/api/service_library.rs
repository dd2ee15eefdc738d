//! Service library: standard code sets, their entries, and mappings from
//! service items to codes. Every call is scoped with `?branchId=`.

use super::{ListSource, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::models::{
    CodeMapping, CodeMappingCreate, CodeSet, CodeSetEntry, CodeSetEntryUpsert, CodeSetUpsert,
    LibraryFilter,
};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const LIBRARY: &str = "/api/infrastructure/service-library";

/// `/api/infrastructure/service-library`
pub struct ServiceLibraryApi<C> {
    http: Arc<C>,
}

fn scoped(path: &str, branch_id: &str) -> String {
    QueryParams::new().push("branchId", branch_id).append_to(path)
}

fn code_set_path(id: &str) -> String {
    format!("{}/code-sets/{}", LIBRARY, segment(id))
}

impl<C: HttpClient> ServiceLibraryApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    // ── Code sets ───────────────────────────────────────────────────

    pub async fn create_code_set(
        &self,
        branch_id: &str,
        payload: &CodeSetUpsert,
    ) -> ClientResult<CodeSet> {
        let path = scoped(&format!("{}/code-sets", LIBRARY), branch_id);
        self.http.post(&path, payload).await
    }

    pub async fn update_code_set(
        &self,
        branch_id: &str,
        id: &str,
        payload: &CodeSetUpsert,
    ) -> ClientResult<CodeSet> {
        self.http
            .patch(&scoped(&code_set_path(id), branch_id), payload)
            .await
    }

    /// Toggle a code set without touching its other fields
    pub async fn set_code_set_active(
        &self,
        branch_id: &str,
        id: &str,
        active: bool,
    ) -> ClientResult<CodeSet> {
        let payload = CodeSetUpsert {
            is_active: Some(active),
            ..CodeSetUpsert::default()
        };
        self.update_code_set(branch_id, id, &payload).await
    }

    pub async fn delete_code_set(&self, branch_id: &str, id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .http
            .delete(&scoped(&code_set_path(id), branch_id))
            .await?;
        Ok(())
    }

    // ── Entries ─────────────────────────────────────────────────────

    pub async fn list_entries(
        &self,
        branch_id: &str,
        code_set_id: &str,
        q: Option<&str>,
    ) -> ClientResult<Vec<CodeSetEntry>> {
        let path = QueryParams::new()
            .push("branchId", branch_id)
            .push_opt("q", q)
            .append_to(&format!("{}/entries", code_set_path(code_set_id)));
        get_list(self.http.as_ref(), &path).await
    }

    /// Insert or update the entry for its code
    pub async fn upsert_entry(
        &self,
        branch_id: &str,
        code_set_id: &str,
        entry: &CodeSetEntryUpsert,
    ) -> ClientResult<()> {
        let path = scoped(&format!("{}/entries", code_set_path(code_set_id)), branch_id);
        post_ignored(self.http.as_ref(), &path, entry).await
    }

    pub async fn delete_entry(
        &self,
        branch_id: &str,
        code_set_id: &str,
        code: &str,
    ) -> ClientResult<()> {
        let path = scoped(
            &format!("{}/entries/{}", code_set_path(code_set_id), segment(code)),
            branch_id,
        );
        let _: IgnoredAny = self.http.delete(&path).await?;
        Ok(())
    }

    // ── Mappings ────────────────────────────────────────────────────

    pub async fn list_mappings(&self, filter: &LibraryFilter) -> ClientResult<Vec<CodeMapping>> {
        let path = QueryParams::from_filter(filter).append_to(&format!("{}/mappings", LIBRARY));
        get_list(self.http.as_ref(), &path).await
    }

    pub async fn create_mapping(
        &self,
        branch_id: &str,
        payload: &CodeMappingCreate,
    ) -> ClientResult<()> {
        let path = scoped(&format!("{}/mappings", LIBRARY), branch_id);
        post_ignored(self.http.as_ref(), &path, payload).await
    }

    pub async fn delete_mapping(&self, branch_id: &str, id: &str) -> ClientResult<()> {
        let path = scoped(&format!("{}/mappings/{}", LIBRARY, segment(id)), branch_id);
        let _: IgnoredAny = self.http.delete(&path).await?;
        Ok(())
    }
}

/// The code-set list page
#[async_trait]
impl<C: HttpClient + 'static> ListSource for ServiceLibraryApi<C> {
    type Row = CodeSet;
    type Filter = LibraryFilter;

    async fn list(&self, filter: &LibraryFilter) -> ClientResult<Vec<CodeSet>> {
        let path = QueryParams::from_filter(filter).append_to(&format!("{}/code-sets", LIBRARY));
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<CodeSet> {
        self.http.get(&code_set_path(id)).await
    }
}
