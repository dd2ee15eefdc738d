//! List/detail view binder
//!
//! Holds what a list page shows: the loaded rows, the open detail record
//! and the load phase. Filter changes are debounced; every load is tagged
//! with a sequence number and only the most recently issued load may write
//! its result, so a slow stale response never overwrites a newer one.
//!
//! Local copies change only after the server confirmed a mutation
//! ([`ListBinder::patch_status`], [`ListBinder::replace`]) or by reloading.

use crate::api::ListSource;
use crate::config::DEFAULT_SEARCH_DEBOUNCE;
use crate::notify::{Notice, Notifier};
use crate::ClientResult;
use parking_lot::Mutex;
use shared::models::{Deactivatable, Record, StatefulRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Load phase of a list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Populated,
    /// Last load failed; rows were cleared
    Failed(String),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct ViewState<R, F> {
    rows: Vec<R>,
    detail: Option<R>,
    phase: LoadPhase,
    filter: F,
    /// Sequence number of the newest issued load
    issued: u64,
}

struct Inner<S: ListSource> {
    source: Arc<S>,
    state: RwLock<ViewState<S::Row, S::Filter>>,
    notifier: Arc<dyn Notifier>,
    label: String,
}

impl<S: ListSource> Inner<S> {
    async fn load(&self) -> ClientResult<()> {
        let (seq, filter) = {
            let mut st = self.state.write().await;
            st.issued += 1;
            st.phase = LoadPhase::Loading;
            (st.issued, st.filter.clone())
        };

        let result = self.source.list(&filter).await;

        let mut st = self.state.write().await;
        if seq != st.issued {
            tracing::debug!(list = %self.label, seq, latest = st.issued, "Discarding stale list response");
            return Ok(());
        }
        match result {
            Ok(rows) => {
                tracing::debug!(list = %self.label, count = rows.len(), "List loaded");
                st.rows = rows;
                st.phase = LoadPhase::Populated;
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(list = %self.label, error = %message, "List load failed");
                st.rows.clear();
                st.phase = LoadPhase::Failed(message.clone());
                drop(st);
                self.notifier.notify(Notice::error("Load failed", message));
                Err(e)
            }
        }
    }
}

/// Binds one list page (and its detail pane) to a [`ListSource`]
pub struct ListBinder<S: ListSource> {
    inner: Arc<Inner<S>>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ListSource> ListBinder<S> {
    pub fn new(source: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: RwLock::new(ViewState {
                    rows: Vec::new(),
                    detail: None,
                    phase: LoadPhase::Idle,
                    filter: S::Filter::default(),
                    issued: 0,
                }),
                notifier,
                label: "records".to_string(),
            }),
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            pending: Mutex::new(None),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Name used in log lines, e.g. `"insurance cases"`
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.label = label.into();
        }
        self
    }

    /// Filter used by the first load; does not trigger a load
    pub async fn with_filter(self, filter: S::Filter) -> Self {
        self.inner.state.write().await.filter = filter;
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.inner.source
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Load now with the current filter, cancelling any debounced reload
    /// that has not fired yet. Used for the initial load, manual refresh and
    /// post-mutation reload.
    pub async fn refresh(&self) -> ClientResult<()> {
        self.cancel_pending();
        self.inner.load().await
    }

    /// Store a new filter and reload once no further change arrives within
    /// the debounce window
    pub async fn set_filter(&self, filter: S::Filter) {
        self.inner.state.write().await.filter = filter;
        self.schedule_reload();
    }

    /// Change the filter in place, then debounce like [`ListBinder::set_filter`]
    pub async fn update_filter(&self, change: impl FnOnce(&mut S::Filter)) {
        change(&mut self.inner.state.write().await.filter);
        self.schedule_reload();
    }

    /// Only the timer is cancellable. Once it fires, the load runs on its
    /// own task and is never aborted; the sequence tag drops stale results.
    fn schedule_reload(&self) {
        let inner = self.inner.clone();
        let delay = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(async move {
                // Failures are already recorded in the state and notified
                let _ = inner.load().await;
            });
        });
        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// A debounced reload is waiting for its timer
    pub fn has_pending_reload(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    // ── Snapshots ───────────────────────────────────────────────────

    pub async fn rows(&self) -> Vec<S::Row> {
        self.inner.state.read().await.rows.clone()
    }

    pub async fn detail(&self) -> Option<S::Row> {
        self.inner.state.read().await.detail.clone()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.inner.state.read().await.phase.clone()
    }

    pub async fn filter(&self) -> S::Filter {
        self.inner.state.read().await.filter.clone()
    }

    /// Record by id: the open detail first, then the list
    pub async fn find(&self, id: &str) -> Option<S::Row> {
        let st = self.inner.state.read().await;
        st.detail
            .iter()
            .chain(st.rows.iter())
            .find(|r| r.id() == id)
            .cloned()
    }

    // ── Detail ──────────────────────────────────────────────────────

    /// Fetch one record and show it as the detail
    pub async fn open_detail(&self, id: &str) -> ClientResult<S::Row> {
        match self.inner.source.fetch(id).await {
            Ok(row) => {
                self.inner.state.write().await.detail = Some(row.clone());
                Ok(row)
            }
            Err(e) => {
                tracing::warn!(list = %self.inner.label, id, error = %e, "Detail load failed");
                self.inner
                    .notifier
                    .notify(Notice::error("Load failed", e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn close_detail(&self) {
        self.inner.state.write().await.detail = None;
    }

    /// Reload the open detail by id and write it back into the list
    pub async fn refresh_detail(&self) -> ClientResult<Option<S::Row>> {
        let Some(id) = self
            .inner
            .state
            .read()
            .await
            .detail
            .as_ref()
            .map(|d| d.id().to_string())
        else {
            return Ok(None);
        };
        let row = self.open_detail(&id).await?;
        self.replace(row.clone()).await;
        Ok(Some(row))
    }

    /// Swap in a server-returned copy of a record (after an edit)
    pub async fn replace(&self, row: S::Row) {
        let mut st = self.inner.state.write().await;
        if let Some(slot) = st.rows.iter_mut().find(|r| r.id() == row.id()) {
            *slot = row.clone();
        }
        if let Some(detail) = st.detail.as_mut()
            && detail.id() == row.id()
        {
            *detail = row;
        }
    }
}

impl<S> ListBinder<S>
where
    S: ListSource,
    S::Row: StatefulRecord,
{
    /// Current status of a loaded record
    pub async fn status_of(&self, id: &str) -> Option<<S::Row as StatefulRecord>::Status> {
        self.find(id).await.map(|r| r.status())
    }

    /// Apply a server-confirmed status to the list row and the open detail.
    /// Returns whether any local copy was found.
    pub async fn patch_status(&self, id: &str, status: <S::Row as StatefulRecord>::Status) -> bool {
        let mut st = self.inner.state.write().await;
        let mut found = false;
        for row in st.rows.iter_mut().filter(|r| r.id() == id) {
            row.set_status(status);
            found = true;
        }
        if let Some(detail) = st.detail.as_mut()
            && detail.id() == id
        {
            detail.set_status(status);
            found = true;
        }
        found
    }
}

impl<S> ListBinder<S>
where
    S: ListSource,
    S::Row: Deactivatable,
{
    /// Apply a server-confirmed deactivation to the list row and the open
    /// detail. Returns whether any local copy was found.
    pub async fn mark_inactive(&self, id: &str) -> bool {
        let mut st = self.inner.state.write().await;
        let mut found = false;
        for row in st.rows.iter_mut().filter(|r| r.id() == id) {
            row.mark_inactive();
            found = true;
        }
        if let Some(detail) = st.detail.as_mut()
            && detail.id() == id
        {
            detail.mark_inactive();
            found = true;
        }
        found
    }
}

impl<S: ListSource> Drop for ListBinder<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
