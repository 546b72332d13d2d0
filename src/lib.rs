//! Incremental search across headless CMS collections.
//!
//! A search widget attached to a host page: keystrokes are debounced, each
//! settled query fans out to every configured collection of a Collection
//! Query API, the per-collection answers are merged in collection order, and
//! the outcome is rendered into the page as a results list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ debounce.rs │────▶│  fetch/      │────▶│ aggregate.rs │────▶│  render/     │
//! │ (Debouncer) │     │ (Coordinator,│     │ (collection  │     │ (RenderState,│
//! │             │     │  tickets)    │     │  order, cap) │     │  markup, css)│
//! └─────────────┘     └──────────────┘     └──────────────┘     └──────────────┘
//!        ▲                   │                                          │
//!        │                   ▼                                          ▼
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                               widget.rs                                      │
//! │          (mount, input and click handlers, supersession, snapshots)          │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     ▼
//!                        page.rs (HostPage, MemoryPage)
//! ```
//!
//! Network access goes through [`CollectionClient`]; the `http` feature
//! provides [`HttpCollectionClient`] on reqwest. The page goes through
//! [`HostPage`]; [`MemoryPage`] is an in-memory document for headless use.
//!
//! # Usage
//!
//! ```ignore
//! use globalsearch::{HttpCollectionClient, MemoryPage, SearchConfig, Widget};
//! use std::sync::Arc;
//!
//! let config = SearchConfig::load("globalsearch.toml".as_ref())?;
//! let page = Arc::new(MemoryPage::with_widget_nodes(
//!     "global-search-input",
//!     "global-search-results",
//!     "global-search-results-list",
//! ));
//! let client = Arc::new(HttpCollectionClient::new("en")?);
//! let widget = Widget::mount(config, page, client)?;
//!
//! widget.on_input("hel");
//! widget.on_input("hello"); // one search, for "hello"
//! ```

pub mod aggregate;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod page;
pub mod render;
pub mod testing;
pub mod types;
pub mod widget;

pub use aggregate::aggregate;
pub use config::{FilterConfig, LocaleMessages, Messages, MountIds, SearchConfig};
pub use debounce::Debouncer;
pub use error::{ConfigError, MountError, SearchError};
pub use fetch::{request_url, CollectionClient, FetchCoordinator, SearchOutcome, SearchTicket};
#[cfg(feature = "http")]
pub use fetch::HttpCollectionClient;
pub use page::{ClickTarget, HostPage, MemoryPage};
pub use render::{render_list, RenderEvent, RenderMachine, RenderState};
pub use types::{ResultItem, SearchQuery};
pub use widget::{RenderSnapshot, Widget};
