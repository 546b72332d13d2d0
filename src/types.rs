// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow through a search.
//!
//! A keystroke becomes a `SearchQuery` (trimmed, possibly empty). Each
//! collection answers with a JSON body whose `data` array holds entry records;
//! every record becomes a `ResultItem`. Parsing is lenient on purpose: the CMS
//! omits `collection` or `blueprint` on some entries, and one odd record must
//! never take down the other forty.
//!
//! # Wire format
//!
//! ```json
//! { "data": [ { "url": "/a", "title": "Hello",
//!               "collection": { "title": "Pages" },
//!               "blueprint":  { "title": "Page" } } ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One rendered search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub url: String,
    pub title: String,
    pub collection_title: String,
    pub blueprint_title: String,
}

impl ResultItem {
    /// Build an item from one entry record.
    ///
    /// Missing or non-string fields become empty strings; a record that is not
    /// an object yields an all-empty item rather than an error.
    pub fn from_record(record: &Value) -> Self {
        Self {
            url: string_field(record, &["url"]),
            title: string_field(record, &["title"]),
            collection_title: string_field(record, &["collection", "title"]),
            blueprint_title: string_field(record, &["blueprint", "title"]),
        }
    }

    /// The descriptor line under the title: `"Pages - Page"`.
    ///
    /// Empty labels are skipped so a missing blueprint does not leave a
    /// dangling separator.
    pub fn descriptor(&self) -> String {
        [self.collection_title.as_str(), self.blueprint_title.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

fn string_field(record: &Value, path: &[&str]) -> String {
    let mut node = record;
    for key in path {
        match node.get(*key) {
            Some(next) => node = next,
            None => return String::new(),
        }
    }
    match node {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Body of `GET {api}/{collection}/entries`.
///
/// `data` is kept as raw values so item-level damage stays item-level.
#[derive(Debug, Default, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl EntriesResponse {
    /// Parsed items in response order. A missing or null `data` is empty.
    pub fn into_items(self) -> Vec<ResultItem> {
        self.data
            .unwrap_or_default()
            .iter()
            .map(ResultItem::from_record)
            .collect()
    }
}

/// Query text after trimming.
///
/// Only non-empty queries reach the network; an empty one sends the widget
/// back to Idle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
