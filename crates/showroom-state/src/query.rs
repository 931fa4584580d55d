//! Paginated, filterable query controller.
//!
//! [`PagedQuery`] drives any list view backed by a paginated fetch: it owns
//! the visible [`QueryState`], issues fetches through an injected async
//! operation, and guarantees that overlapping fetches can never leave the
//! state reflecting anything but the most recently issued request.
//!
//! Every fetch initiation increments a generation counter and captures the
//! new value; when the fetch settles, its outcome is applied only if the
//! captured generation is still current. Superseded fetches run to
//! completion and are discarded at the point their result would otherwise
//! land. There is no cancellation and no controller-imposed timeout: a
//! hung request simply holds `Loading` until a newer load is issued.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use showroom_client::ApiError;
use showroom_model::Paginated;

/// Filter key/value mapping tracked by the controller. Keys are unique;
/// an absent key means the filter is not applied.
pub type Filters = BTreeMap<String, String>;

/// Parameters handed to the injected fetch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index.
    pub page: u32,
    pub filters: Filters,
}

/// Fetch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No load has been issued yet. Unreachable after the first `load`.
    Idle,
    Loading,
    Success,
    Error,
}

/// Pagination facts derived from the last successful fetch.
///
/// Only the presence of next/previous links is consumed; navigation is
/// index-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Visible state of one paginated collection.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub items: Vec<T>,
    pub page_info: Option<PageInfo>,
    pub filters: Filters,
    /// 1-based page of the most recently issued request.
    pub page: u32,
    pub phase: Phase,
    /// Display string for the last failure, cleared on the next load.
    pub error_message: Option<String>,
}

impl<T> QueryState<T> {
    fn idle(filters: Filters) -> Self {
        Self {
            items: Vec::new(),
            page_info: None,
            filters,
            page: 1,
            phase: Phase::Idle,
            error_message: None,
        }
    }
}

/// Boxed future returned by the injected fetch operation.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<Paginated<T>, ApiError>> + Send>>;

/// State machine driving a paginated, filterable collection fetch.
///
/// Shared references are fine: state lives behind a mutex and the
/// generation counter is atomic, so overlapping `load` calls through the
/// same instance are sound. Locks are never held across an await.
pub struct PagedQuery<T> {
    fetch: Box<dyn Fn(PageRequest) -> FetchFuture<T> + Send + Sync>,
    state: Mutex<QueryState<T>>,
    generation: AtomicU64,
}

impl<T> PagedQuery<T> {
    /// Controller with an empty initial filter set.
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn(PageRequest) -> FetchFuture<T> + Send + Sync + 'static,
    {
        Self::with_filters(fetch, Filters::new())
    }

    /// Controller starting from the given filter set.
    pub fn with_filters<F>(fetch: F, initial_filters: Filters) -> Self
    where
        F: Fn(PageRequest) -> FetchFuture<T> + Send + Sync + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            state: Mutex::new(QueryState::idle(initial_filters)),
            generation: AtomicU64::new(0),
        }
    }

    /// Issue a fetch for the given page and filters.
    ///
    /// The `Loading` phase (and the new page/filters) are committed
    /// synchronously, before the fetch settles, so callers can render a
    /// loading indicator immediately.
    pub async fn load(&self, page: u32, filters: Filters) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = PageRequest {
            page,
            filters: filters.clone(),
        };
        {
            let mut state = self.state.lock().unwrap();
            state.phase = Phase::Loading;
            state.error_message = None;
            state.page = page;
            state.filters = filters;
        }
        debug!(page, generation, "Issuing page fetch");

        let outcome = (self.fetch)(request).await;

        let mut state = self.state.lock().unwrap();
        if generation != self.generation.load(Ordering::SeqCst) {
            // A newer load was issued while this one was in flight.
            debug!(generation, "Discarding superseded fetch outcome");
            return;
        }
        match outcome {
            Ok(result) => {
                debug!(
                    generation,
                    count = result.count,
                    items = result.results.len(),
                    "Applying fetched page"
                );
                state.page_info = Some(PageInfo {
                    total_count: result.count,
                    has_next: result.has_next(),
                    has_previous: result.has_previous(),
                });
                state.items = result.results;
                state.phase = Phase::Success;
                state.error_message = None;
            }
            Err(error) => {
                debug!(generation, %error, "Fetch failed");
                state.items.clear();
                state.page_info = None;
                state.phase = Phase::Error;
                state.error_message = Some(error.user_message());
            }
        }
    }

    /// Replace the filter set. Pagination unconditionally resets to page 1:
    /// a result set addressed by the old filters and page N is meaningless
    /// under new filters.
    pub async fn change_filters(&self, filters: Filters) {
        self.load(1, filters).await;
    }

    /// Navigate to a page under the current filters. Page 0 is rejected as
    /// a no-op; pages are 1-based.
    pub async fn change_page(&self, page: u32) {
        if page < 1 {
            return;
        }
        let filters = self.state.lock().unwrap().filters.clone();
        self.load(page, filters).await;
    }

    /// Navigate to a page, replacing the filters in the same request.
    pub async fn change_page_with(&self, page: u32, filters: Filters) {
        if page < 1 {
            return;
        }
        self.load(page, filters).await;
    }

    /// Re-issue the current request. Used for manual retry after an error;
    /// the controller never retries on its own.
    pub async fn refetch(&self) {
        let (page, filters) = {
            let state = self.state.lock().unwrap();
            (state.page, state.filters.clone())
        };
        self.load(page, filters).await;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.lock().unwrap().phase
    }

    /// Page of the most recently issued request.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.lock().unwrap().page
    }

    /// Filters of the most recently issued request.
    #[must_use]
    pub fn filters(&self) -> Filters {
        self.state.lock().unwrap().filters.clone()
    }
}

impl<T: Clone> PagedQuery<T> {
    /// Snapshot of the visible state.
    #[must_use]
    pub fn snapshot(&self) -> QueryState<T> {
        self.state.lock().unwrap().clone()
    }
}
