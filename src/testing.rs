//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides a scripted `CollectionClient` so tests can stage slow, fast,
//! failing and out-of-order collection responses without a server.

#![doc(hidden)]

use crate::error::SearchError;
use crate::fetch::{CollectionClient, TITLE_CONTAINS};
use crate::types::ResultItem;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// Matches any query for a collection.
pub const ANY_QUERY: &str = "*";

/// Create an entry record as the Collection Query API returns it.
pub fn entry(url: &str, title: &str, collection: &str, blueprint: &str) -> Value {
    json!({
        "url": url,
        "title": title,
        "collection": { "title": collection },
        "blueprint": { "title": blueprint },
    })
}

#[derive(Debug, Clone)]
enum Reply {
    Records(Vec<Value>),
    Status(u16),
    Transport(String),
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// Scripted client keyed by `(collection, query)`.
///
/// Unscripted requests answer `{ "data": [] }` immediately. Every request is
/// recorded before its delay starts; `finished_count` only counts requests
/// that ran to completion, so an aborted request is visible as the gap.
#[derive(Debug, Default)]
pub struct FakeClient {
    routes: Mutex<HashMap<(String, String), Scripted>>,
    requests: Mutex<Vec<Url>>,
    finished: AtomicUsize,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, collection: &str, query: &str, reply: Reply, delay: Duration) -> &Self {
        self.routes.lock().insert(
            (collection.to_string(), query.to_string()),
            Scripted { reply, delay },
        );
        self
    }

    pub fn respond(&self, collection: &str, query: &str, records: Vec<Value>) -> &Self {
        self.script(collection, query, Reply::Records(records), Duration::ZERO)
    }

    pub fn respond_after(
        &self,
        collection: &str,
        query: &str,
        delay: Duration,
        records: Vec<Value>,
    ) -> &Self {
        self.script(collection, query, Reply::Records(records), delay)
    }

    pub fn fail(&self, collection: &str, query: &str, status: u16) -> &Self {
        self.script(collection, query, Reply::Status(status), Duration::ZERO)
    }

    pub fn fail_after(&self, collection: &str, query: &str, delay: Duration, status: u16) -> &Self {
        self.script(collection, query, Reply::Status(status), delay)
    }

    pub fn disconnect(&self, collection: &str, query: &str, message: &str) -> &Self {
        self.script(
            collection,
            query,
            Reply::Transport(message.to_string()),
            Duration::ZERO,
        )
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }

    /// Title queries requested so far, in request order.
    pub fn queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .filter_map(|url| title_query(url))
            .collect()
    }

    pub fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    fn lookup(&self, collection: &str, query: &str) -> Option<Scripted> {
        let routes = self.routes.lock();
        routes
            .get(&(collection.to_string(), query.to_string()))
            .or_else(|| routes.get(&(collection.to_string(), ANY_QUERY.to_string())))
            .cloned()
    }
}

fn title_query(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == TITLE_CONTAINS)
        .map(|(_, value)| value.into_owned())
}

impl CollectionClient for FakeClient {
    async fn fetch_entries(&self, collection: &str, url: Url) -> Result<Vec<ResultItem>, SearchError> {
        let query = title_query(&url).unwrap_or_default();
        self.requests.lock().push(url);

        let scripted = self.lookup(collection, &query).unwrap_or(Scripted {
            reply: Reply::Records(Vec::new()),
            delay: Duration::ZERO,
        });
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);

        match scripted.reply {
            Reply::Records(records) => Ok(records.iter().map(ResultItem::from_record).collect()),
            Reply::Status(status) => Err(SearchError::Http {
                collection: collection.to_string(),
                status,
            }),
            Reply::Transport(message) => Err(SearchError::Transport {
                collection: collection.to_string(),
                message,
            }),
        }
    }
}
