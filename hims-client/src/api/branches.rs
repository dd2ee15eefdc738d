//! Branches

use super::get_list;
use crate::{ClientResult, HttpClient};
use shared::models::Branch;
use shared::query::segment;
use std::sync::Arc;

const BRANCHES: &str = "/api/branches";

/// `/api/branches`
pub struct BranchesApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> BranchesApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Branch>> {
        get_list(self.http.as_ref(), BRANCHES).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Branch> {
        self.http
            .get(&format!("{}/{}", BRANCHES, segment(id)))
            .await
    }

    /// `"CODE - Name"` for a branch id. Falls back to the branch list when
    /// the single-branch lookup fails, and to the raw id when both fail.
    pub async fn resolve_name(&self, id: &str) -> String {
        match self.get(id).await {
            Ok(branch) => return branch.display_name(),
            Err(e) => tracing::debug!(id, error = %e, "Branch lookup failed, trying list"),
        }
        match self.list().await {
            Ok(branches) => branches
                .iter()
                .find(|b| b.id == id)
                .map(Branch::display_name)
                .unwrap_or_else(|| id.to_string()),
            Err(e) => {
                tracing::debug!(id, error = %e, "Branch list failed, showing raw id");
                id.to_string()
            }
        }
    }
}
