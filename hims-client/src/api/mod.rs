//! Typed endpoint clients
//!
//! One client per backend area, all sharing the same [`HttpClient`]. The
//! clients that back a list/detail page implement [`ListSource`]; the ones
//! whose records move through a lifecycle via a generic transition
//! endpoint implement [`TransitionEndpoint`].

mod billing;
mod branches;
mod governance;
mod packages;
mod preauth;
mod resources;
mod rooms;
mod service_library;
mod units;

pub use billing::{CasesApi, PoliciesApi};
pub use branches::BranchesApi;
pub use governance::{GovernanceApi, PackInstall, PackStep, PolicyWizard, WizardStep};
pub use packages::PackagesApi;
pub use preauth::PreauthApi;
pub use resources::ResourcesApi;
pub use rooms::RoomsApi;
pub use service_library::ServiceLibraryApi;
pub use units::UnitsApi;

use crate::binder::ListBinder;
use crate::config::DEFAULT_SEARCH_DEBOUNCE;
use crate::notify::Notifier;
use crate::{ClientConfig, ClientResult, HttpClient, NetworkHttpClient};
use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::Lifecycle;
use shared::models::{Deactivatable, Record};
use shared::response::ListEnvelope;
use std::sync::Arc;
use std::time::Duration;

/// Backend of a list/detail page
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Row: Record;
    type Filter: Clone + Default + Send + Sync + 'static;

    async fn list(&self, filter: &Self::Filter) -> ClientResult<Vec<Self::Row>>;

    async fn fetch(&self, id: &str) -> ClientResult<Self::Row>;
}

/// Generic status transition endpoint of a lifecycle entity
#[async_trait]
pub trait TransitionEndpoint: Send + Sync + 'static {
    type Status: Lifecycle;

    /// Ask the server to move `id` to `target`. The reply body is ignored;
    /// the caller patches its local copy once this returns `Ok`.
    async fn post_transition(
        &self,
        id: &str,
        target: Self::Status,
        reason: Option<&str>,
    ) -> ClientResult<()>;
}

/// Soft deactivation / reactivation endpoint of an infrastructure record
#[async_trait]
pub trait DeactivationEndpoint: Send + Sync + 'static {
    type Row: Deactivatable;

    /// Record name used in notices, e.g. `"Room"`
    const LABEL: &'static str;

    /// Soft-deactivate `id`; `reason` is already trimmed and non-blank.
    /// `cascade` also deactivates child records where the record has any.
    async fn post_deactivation(&self, id: &str, reason: &str, cascade: bool) -> ClientResult<()>;

    async fn post_reactivation(&self, id: &str) -> ClientResult<()>;
}

/// GET a list endpoint accepting either a bare array or `{ rows: [...] }`.
/// An empty body is an empty list.
pub(crate) async fn get_list<C, T>(http: &C, path: &str) -> ClientResult<Vec<T>>
where
    C: HttpClient,
    T: DeserializeOwned + Send,
{
    let envelope: Option<ListEnvelope<T>> = http.get(path).await?;
    Ok(envelope.map(ListEnvelope::into_vec).unwrap_or_default())
}

/// POST whose reply body is irrelevant
pub(crate) async fn post_ignored<C, B>(http: &C, path: &str, body: &B) -> ClientResult<()>
where
    C: HttpClient,
    B: serde::Serialize + Sync,
{
    let _: IgnoredAny = http.post(path, body).await?;
    Ok(())
}

/// Every endpoint client over one shared transport
///
/// Clients are held in `Arc`s so a binder and a transition flow can share
/// the same endpoint.
pub struct HimsClient<C> {
    pub cases: Arc<CasesApi<C>>,
    pub policies: Arc<PoliciesApi<C>>,
    pub preauth: Arc<PreauthApi<C>>,
    pub resources: Arc<ResourcesApi<C>>,
    pub rooms: Arc<RoomsApi<C>>,
    pub units: Arc<UnitsApi<C>>,
    pub packages: Arc<PackagesApi<C>>,
    pub service_library: Arc<ServiceLibraryApi<C>>,
    pub governance: Arc<GovernanceApi<C>>,
    pub branches: Arc<BranchesApi<C>>,
    search_debounce: Duration,
}

impl<C: HttpClient> HimsClient<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self {
            cases: Arc::new(CasesApi::new(http.clone())),
            policies: Arc::new(PoliciesApi::new(http.clone())),
            preauth: Arc::new(PreauthApi::new(http.clone())),
            resources: Arc::new(ResourcesApi::new(http.clone())),
            rooms: Arc::new(RoomsApi::new(http.clone())),
            units: Arc::new(UnitsApi::new(http.clone())),
            packages: Arc::new(PackagesApi::new(http.clone())),
            service_library: Arc::new(ServiceLibraryApi::new(http.clone())),
            governance: Arc::new(GovernanceApi::new(http.clone())),
            branches: Arc::new(BranchesApi::new(http)),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    /// Debounce window given to binders made by [`HimsClient::binder`]
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    /// List/detail binder over one of this client's endpoints, using the
    /// configured search debounce
    pub fn binder<S: ListSource>(
        &self,
        source: &Arc<S>,
        notifier: Arc<dyn Notifier>,
    ) -> ListBinder<S> {
        ListBinder::new(source.clone(), notifier).with_debounce(self.search_debounce)
    }
}

impl HimsClient<NetworkHttpClient> {
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(NetworkHttpClient::new(config)?))
            .with_search_debounce(config.search_debounce))
    }
}
