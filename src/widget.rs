// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The widget controller.
//!
//! Ties the pieces together for one mounted instance:
//!
//! ```text
//!   input event ─▶ Debouncer ─▶ handle_input ─┬─ empty ─▶ cancel live search ─▶ Idle
//!                                             └─ query ─▶ begin ticket ─▶ Loading
//!                                                          │
//!                                                  fetch_all (fan-out)
//!                                                          │
//!                                     still current? ──────┴─▶ Populated / Empty / Error
//!   document click ─▶ outside input and results? ─▶ hide container (state kept)
//! ```
//!
//! All per-instance state (current ticket, render machine, resolved messages)
//! lives in the instance. Two widgets on one page share nothing but the
//! injected stylesheet, which is guarded by its marker id on the page itself.
//!
//! Supersession and the final render happen under the render machine lock.
//! A search whose ticket went stale while it was in flight never reaches the
//! page, however its responses are ordered against newer ones.

use crate::config::{LocaleMessages, SearchConfig};
use crate::debounce::Debouncer;
use crate::error::MountError;
use crate::fetch::{CollectionClient, FetchCoordinator, SearchOutcome, SearchTicket};
use crate::page::{ClickTarget, HostPage};
use crate::render::{render_list, stylesheet, RenderEvent, RenderMachine, RenderState, STYLE_MARKER};
use crate::types::SearchQuery;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error};

/// What the page shows after a render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderSnapshot {
    pub state: RenderState,
    pub visible: bool,
    /// Trimmed query the state belongs to.
    pub query: String,
}

struct Inner<P, C> {
    config: Arc<SearchConfig>,
    page: Arc<P>,
    coordinator: FetchCoordinator<C>,
    machine: Mutex<RenderMachine>,
    messages: LocaleMessages,
    snapshots: watch::Sender<RenderSnapshot>,
}

/// A search widget mounted on a host page.
pub struct Widget<P, C> {
    inner: Arc<Inner<P, C>>,
    debouncer: Debouncer<String>,
}

impl<P: HostPage, C: CollectionClient> Widget<P, C> {
    /// Attach to `page`.
    ///
    /// Fails without touching the page when a mount node is missing or the
    /// configuration is unusable. Must run inside a tokio runtime.
    pub fn mount(config: SearchConfig, page: Arc<P>, client: Arc<C>) -> Result<Self, MountError> {
        if tokio::runtime::Handle::try_current().is_err() {
            error!("search widget not mounted: no tokio runtime");
            return Err(MountError::NoRuntime);
        }
        if let Err(err) = config.validate() {
            error!(error = %err, "search widget not mounted: invalid configuration");
            return Err(err.into());
        }

        let mount = &config.mount;
        for (id, role) in [
            (&mount.input, "search input"),
            (&mount.results, "results container"),
            (&mount.list, "results list"),
        ] {
            if !page.has_element(id) {
                error!(id = %id, role, "search widget not mounted: element missing");
                return Err(MountError::MissingElement {
                    id: id.clone(),
                    role,
                });
            }
        }

        let locale = config.resolve_locale(page.lang().as_deref());
        let messages = config.messages.for_locale(&locale).clone();
        let config = Arc::new(config);
        let coordinator = match FetchCoordinator::new(client, Arc::clone(&config), locale.clone()) {
            Ok(coordinator) => coordinator,
            Err(err) => {
                error!(error = %err, "search widget not mounted: unusable api base");
                return Err(err.into());
            }
        };

        page.set_attribute(&config.mount.input, "placeholder", &messages.placeholder);
        if !page.has_style(STYLE_MARKER) {
            page.inject_style(STYLE_MARKER, &stylesheet(&locale));
        }
        page.set_visible(&config.mount.results, false);

        let (snapshots, _) = watch::channel(RenderSnapshot::default());
        let inner = Arc::new(Inner {
            config,
            page,
            coordinator,
            machine: Mutex::new(RenderMachine::new()),
            messages,
            snapshots,
        });

        let delay = Duration::from_millis(inner.config.debounce_ms);
        let for_debouncer = Arc::clone(&inner);
        let debouncer = Debouncer::new(delay, move |raw: String| submit_debounced(&for_debouncer, &raw));

        debug!(locale = %locale, debounce_ms = inner.config.debounce_ms, "search widget mounted");
        Ok(Self { inner, debouncer })
    }

    /// Input event: the field now holds `raw`. Debounced.
    pub fn on_input(&self, raw: &str) {
        self.debouncer.call(raw.to_string());
    }

    /// Document click: hide the results when the click landed outside both
    /// the input and the results container.
    pub fn on_document_click(&self, target: &ClickTarget) {
        self.inner.on_document_click(target);
    }

    /// Run the input handler for `raw` now, bypassing the debouncer.
    pub async fn handle_input(&self, raw: &str) {
        self.inner.handle_input(raw).await;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Receiver that sees every render.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    pub fn locale(&self) -> &str {
        self.inner.coordinator.locale()
    }

    pub fn messages(&self) -> &LocaleMessages {
        &self.inner.messages
    }
}

/// Debounced input: the ticket is issued before the callback returns, so
/// tickets follow input order; only the fan-out runs on a spawned task.
fn submit_debounced<P: HostPage, C: CollectionClient>(inner: &Arc<Inner<P, C>>, raw: &str) {
    if let Some((query, ticket)) = inner.submit(raw) {
        let inner = Arc::clone(inner);
        tokio::spawn(async move { inner.complete(&query, &ticket).await });
    }
}

impl<P: HostPage, C: CollectionClient> Inner<P, C> {
    async fn handle_input(&self, raw: &str) {
        if let Some((query, ticket)) = self.submit(raw) {
            self.complete(&query, &ticket).await;
        }
    }

    /// Cancel the live search and render Idle or Loading. Returns the new
    /// ticket when there is something to fetch.
    fn submit(&self, raw: &str) -> Option<(SearchQuery, SearchTicket)> {
        let query = SearchQuery::new(raw);
        let mut machine = self.machine.lock();
        if query.is_empty() {
            self.coordinator.cancel_current();
            machine.apply(RenderEvent::QueryCleared);
            self.render(&machine, &query);
            return None;
        }
        let ticket = self.coordinator.begin();
        machine.apply(RenderEvent::QuerySubmitted);
        self.render(&machine, &query);
        Some((query, ticket))
    }

    async fn complete(&self, query: &SearchQuery, ticket: &SearchTicket) {
        let result = self.coordinator.fetch_all(ticket, query.as_str()).await;

        let mut machine = self.machine.lock();
        if !self.coordinator.is_current(ticket) {
            debug!(query = %query, "dropping results of superseded search");
            return;
        }
        let event = match result {
            Ok(SearchOutcome::Completed(items)) => RenderEvent::Resolved(items),
            Ok(SearchOutcome::Superseded) => return,
            Err(err) => {
                error!(
                    error = %err,
                    collection = err.collection(),
                    query = %query,
                    "search failed"
                );
                RenderEvent::Failed
            }
        };
        machine.apply(event);
        self.render(&machine, query);
    }

    fn on_document_click(&self, target: &ClickTarget) {
        let mount = &self.config.mount;
        if self.page.contains(&mount.input, target) || self.page.contains(&mount.results, target) {
            return;
        }
        let mut machine = self.machine.lock();
        machine.dismiss();
        self.page.set_visible(&mount.results, false);
        self.snapshots.send_modify(|snapshot| snapshot.visible = false);
    }

    fn render(&self, machine: &RenderMachine, query: &SearchQuery) {
        let mount = &self.config.mount;
        let html = render_list(machine.state(), &self.messages);
        self.page.set_inner_html(&mount.list, &html);
        self.page.set_visible(&mount.results, machine.is_visible());
        self.snapshots.send_replace(RenderSnapshot {
            state: machine.state().clone(),
            visible: machine.is_visible(),
            query: query.to_string(),
        });
    }
}

impl<P, C> std::fmt::Debug for Widget<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("mount", &self.inner.config.mount)
            .field("coordinator", &self.inner.coordinator)
            .field("snapshot", &*self.inner.snapshots.borrow())
            .finish_non_exhaustive()
    }
}

impl<P, C> Drop for Widget<P, C> {
    fn drop(&mut self) {
        self.inner.coordinator.cancel_current();
    }
}
