// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Transport seam for the Collection Query API.
//!
//! The coordinator does not care how bytes move, only that a URL for one
//! collection turns into that collection's items or a `SearchError`. Dropping
//! the returned future must abort the request; the coordinator relies on that
//! to actually cancel superseded work instead of merely ignoring it.

use crate::error::SearchError;
use crate::types::ResultItem;
use std::future::Future;
use url::Url;

/// Fetches the entries of one collection.
pub trait CollectionClient: Send + Sync + 'static {
    fn fetch_entries(
        &self,
        collection: &str,
        url: Url,
    ) -> impl Future<Output = Result<Vec<ResultItem>, SearchError>> + Send;
}

#[cfg(feature = "http")]
pub use http::HttpCollectionClient;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::types::EntriesResponse;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
    use reqwest::Client;

    /// `reqwest`-backed client. Cheap to clone; clones share a connection pool.
    #[derive(Debug, Clone)]
    pub struct HttpCollectionClient {
        client: Client,
    }

    impl HttpCollectionClient {
        /// Build a client that announces `locale` in `Accept-Language`.
        ///
        /// No request timeout is set: a hung request stays pending until the
        /// next search supersedes it.
        pub fn new(locale: &str) -> Result<Self, reqwest::Error> {
            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            if let Ok(value) = HeaderValue::from_str(locale) {
                headers.insert(ACCEPT_LANGUAGE, value);
            }
            let client = Client::builder()
                .user_agent(concat!("globalsearch/", env!("CARGO_PKG_VERSION")))
                .default_headers(headers)
                .build()?;
            Ok(Self { client })
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl CollectionClient for HttpCollectionClient {
        async fn fetch_entries(
            &self,
            collection: &str,
            url: Url,
        ) -> Result<Vec<ResultItem>, SearchError> {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| SearchError::Transport {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Http {
                    collection: collection.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(|e| SearchError::Transport {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;
            let parsed: EntriesResponse =
                serde_json::from_slice(&body).map_err(|e| SearchError::Decode {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;
            Ok(parsed.into_items())
        }
    }
}
