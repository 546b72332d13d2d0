// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the widget.
//!
//! Three families, one per boundary. `SearchError` covers everything that can
//! go wrong between issuing a collection request and holding parsed records.
//! `ConfigError` is raised while loading or validating configuration, before
//! any widget exists. `MountError` stops a widget from attaching to its page;
//! it is fatal to that widget's initialization and nothing else.
//!
//! Cancellation has no variant here. A superseded search is an outcome, not a
//! failure (see `fetch::SearchOutcome`).

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one collection request, which fails the whole search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The API answered with a non-2xx status.
    #[error("collection `{collection}` returned HTTP {status}")]
    Http { collection: String, status: u16 },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("request to collection `{collection}` failed: {message}")]
    Transport { collection: String, message: String },

    /// The response body was not a JSON document.
    #[error("collection `{collection}` returned an unreadable body: {message}")]
    Decode { collection: String, message: String },

    /// The request URL could not be built from the configured base.
    #[error("cannot build request URL for collection `{collection}`: {message}")]
    Url { collection: String, message: String },
}

impl SearchError {
    /// Name of the collection whose request failed.
    pub fn collection(&self) -> &str {
        match self {
            SearchError::Http { collection, .. }
            | SearchError::Transport { collection, .. }
            | SearchError::Decode { collection, .. }
            | SearchError::Url { collection, .. } => collection,
        }
    }
}

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("collection `{0}` is listed more than once")]
    DuplicateCollection(String),

    #[error("collection names must not be empty")]
    EmptyCollectionName,

    #[error("api base path must not be empty")]
    EmptyApiBase,

    #[error("api base `{base}` is not a valid URL: {message}")]
    InvalidApiBase { base: String, message: String },

    #[error("api base `{0}` is relative and no origin is configured")]
    RelativeApiBase(String),

    #[error("default locale `{0}` has no message table")]
    MissingDefaultLocale(String),
}

/// The widget could not attach to its host page.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("host page has no element with id `{id}` ({role})")]
    MissingElement { id: String, role: &'static str },

    #[error("invalid widget configuration")]
    Config(#[from] ConfigError),

    #[error("widget must be mounted from within a tokio runtime")]
    NoRuntime,
}
