// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cancellable multi-collection fetch.
//!
//! One search is one fan-out: a request per configured collection, all in
//! flight at once, all bound to a single `CancellationToken`. Starting a new
//! search cancels the previous token *before* any new request leaves, so there
//! is never more than one live search per coordinator.
//!
//! Cancellation is cooperative but real. Each request races its token in a
//! biased `select!`; when the token fires, the request future is dropped,
//! which aborts the underlying HTTP exchange. Anything that still trickles in
//! for a dead ticket is discarded by the `is_current` check after the join.
//!
//! ```text
//!   dispatch("hel")    begin ─▶ token#7 ─┬─ GET experience ─┐
//!                                        ├─ GET place ──────┼─▶ try_join_all ─▶ is_current(#7)?
//!                                        └─ GET pages ──────┘
//!   dispatch("hello")  begin ─▶ cancel #7, token#8 ─▶ ...
//! ```
//!
//! Failure policy: the first collection to fail fails the search, and the
//! rest of its requests are dropped. A failure on a superseded ticket is
//! reported as `Superseded`, never as an error.

mod client;
mod request;

pub use client::CollectionClient;
#[cfg(feature = "http")]
pub use client::HttpCollectionClient;
pub use request::{request_url, LOCALE_IS, PUBLISHED_IS, TITLE_CONTAINS};

use crate::aggregate::aggregate;
use crate::config::SearchConfig;
use crate::error::{ConfigError, SearchError};
use crate::types::ResultItem;
use futures::future::try_join_all;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Handle for one issued search.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    id: u64,
    token: CancellationToken,
}

impl SearchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// How a search ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// All collections answered; items in collection order, then response order.
    Completed(Vec<ResultItem>),
    /// A newer search (or a cleared query) took over.
    Superseded,
}

/// Issues collection fan-outs and keeps the single current ticket.
pub struct FetchCoordinator<C> {
    client: Arc<C>,
    config: Arc<SearchConfig>,
    base: Url,
    locale: String,
    current: Mutex<Option<SearchTicket>>,
    next_id: AtomicU64,
}

impl<C> FetchCoordinator<C> {
    /// Resolve the API base once; a relative base without an origin fails here.
    pub fn new(
        client: Arc<C>,
        config: Arc<SearchConfig>,
        locale: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base = config.api_base_url()?;
        Ok(Self {
            client,
            config,
            base,
            locale: locale.into(),
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Cancel the live search (if any) and make a fresh ticket current.
    pub fn begin(&self) -> SearchTicket {
        let ticket = SearchTicket {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            token: CancellationToken::new(),
        };
        let mut current = self.current.lock();
        if let Some(previous) = current.replace(ticket.clone()) {
            previous.token.cancel();
            debug!(superseded = previous.id, by = ticket.id, "search superseded");
        }
        ticket
    }

    /// Cancel the live search without starting another one.
    pub fn cancel_current(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.token.cancel();
            debug!(cancelled = previous.id, "search cancelled");
        }
    }

    /// Whether `ticket` is still the one whose results may be shown.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        !ticket.token.is_cancelled()
            && self
                .current
                .lock()
                .as_ref()
                .is_some_and(|current| current.id == ticket.id)
    }
}

impl<C: CollectionClient> FetchCoordinator<C> {
    /// Fan out `query` to every collection under `ticket`.
    pub async fn fetch_all(
        &self,
        ticket: &SearchTicket,
        query: &str,
    ) -> Result<SearchOutcome, SearchError> {
        debug!(
            ticket = ticket.id,
            query,
            collections = self.config.collections.len(),
            "search started"
        );

        let requests = self.config.collections.iter().map(|collection| {
            let token = ticket.token.clone();
            async move {
                let url = request_url(
                    &self.base,
                    collection,
                    query,
                    &self.config.filters,
                    &self.locale,
                )
                .map_err(|e| SearchError::Url {
                    collection: collection.clone(),
                    message: e.to_string(),
                })?;

                tokio::select! {
                    biased;

                    () = token.cancelled() => Ok(None),
                    result = self.client.fetch_entries(collection, url) => result.map(Some),
                }
            }
        });

        let settled = try_join_all(requests).await;

        if !self.is_current(ticket) {
            debug!(ticket = ticket.id, "discarding superseded search");
            return Ok(SearchOutcome::Superseded);
        }

        // INVARIANT: a `None` only comes from a cancelled token, which
        // `is_current` has already ruled out.
        let Some(per_collection) = settled?.into_iter().collect::<Option<Vec<_>>>() else {
            return Ok(SearchOutcome::Superseded);
        };

        let items = aggregate(per_collection, self.config.max_results);
        debug!(ticket = ticket.id, results = items.len(), "search completed");
        Ok(SearchOutcome::Completed(items))
    }

    /// Supersede any live search and run `query`.
    pub async fn dispatch(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let ticket = self.begin();
        self.fetch_all(&ticket, query).await
    }

    /// Run `query`; a superseded search quietly yields no items.
    pub async fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
        match self.dispatch(query).await? {
            SearchOutcome::Completed(items) => Ok(items),
            SearchOutcome::Superseded => Ok(Vec::new()),
        }
    }
}

impl<C> std::fmt::Debug for FetchCoordinator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("base", &self.base.as_str())
            .field("locale", &self.locale)
            .field("collections", &self.config.collections)
            .finish_non_exhaustive()
    }
}
