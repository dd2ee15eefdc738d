//! Insurance cases and insurance policies

use super::{ListSource, TransitionEndpoint, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::lifecycle::CaseStatus;
use shared::models::{
    CaseFilter, CaseTransitionRequest, InsuranceCase, InsuranceCaseCreate, InsurancePolicy,
    InsurancePolicyUpsert, PolicyFilter,
};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const CASES: &str = "/api/billing/insurance-cases";
const POLICIES: &str = "/api/billing/insurance-policies";

/// `/api/billing/insurance-cases`
pub struct CasesApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> CasesApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    pub async fn create(&self, payload: &InsuranceCaseCreate) -> ClientResult<InsuranceCase> {
        let created: InsuranceCase = self.http.post(CASES, payload).await?;
        tracing::info!(id = %created.id, case_number = %created.case_number, "Insurance case created");
        Ok(created)
    }

    pub async fn transition(&self, id: &str, target: CaseStatus) -> ClientResult<()> {
        let path = format!("{}/{}/transition", CASES, segment(id));
        post_ignored(
            self.http.as_ref(),
            &path,
            &CaseTransitionRequest {
                target_status: target,
            },
        )
        .await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for CasesApi<C> {
    type Row = InsuranceCase;
    type Filter = CaseFilter;

    async fn list(&self, filter: &CaseFilter) -> ClientResult<Vec<InsuranceCase>> {
        let path = QueryParams::from_filter(filter).append_to(CASES);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<InsuranceCase> {
        self.http.get(&format!("{}/{}", CASES, segment(id))).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> TransitionEndpoint for CasesApi<C> {
    type Status = CaseStatus;

    /// Cases take no reason; any reason given is not sent
    async fn post_transition(
        &self,
        id: &str,
        target: CaseStatus,
        _reason: Option<&str>,
    ) -> ClientResult<()> {
        self.transition(id, target).await
    }
}

/// `/api/billing/insurance-policies`
pub struct PoliciesApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> PoliciesApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    pub async fn create(&self, payload: &InsurancePolicyUpsert) -> ClientResult<InsurancePolicy> {
        let created: InsurancePolicy = self.http.post(POLICIES, payload).await?;
        tracing::info!(id = %created.id, policy_number = %created.policy_number, "Insurance policy created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &InsurancePolicyUpsert,
    ) -> ClientResult<InsurancePolicy> {
        self.http
            .patch(&format!("{}/{}", POLICIES, segment(id)), payload)
            .await
    }

    /// Mark the policy verified by the current user
    pub async fn verify(&self, id: &str) -> ClientResult<()> {
        let path = format!("{}/{}/verify", POLICIES, segment(id));
        let _: IgnoredAny = self.http.post_empty(&path).await?;
        tracing::info!(id, "Insurance policy verified");
        Ok(())
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for PoliciesApi<C> {
    type Row = InsurancePolicy;
    type Filter = PolicyFilter;

    async fn list(&self, filter: &PolicyFilter) -> ClientResult<Vec<InsurancePolicy>> {
        let path = QueryParams::from_filter(filter).append_to(POLICIES);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<InsurancePolicy> {
        self.http.get(&format!("{}/{}", POLICIES, segment(id))).await
    }
}
