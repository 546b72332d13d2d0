//! Shared test utilities and fixtures.

#![allow(dead_code)]

use globalsearch::{MemoryPage, SearchConfig, Widget};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

// Re-export canonical test utilities from globalsearch::testing
pub use globalsearch::testing::{entry, FakeClient};

// ============================================================================
// MOUNT NODES
// ============================================================================

pub const INPUT: &str = "global-search-input";
pub const RESULTS: &str = "global-search-results";
pub const LIST: &str = "global-search-results-list";

/// Default debounce delay, plus enough slack for the fan-out to settle.
pub const PAST_DEBOUNCE: Duration = Duration::from_millis(400);

pub type TestWidget = Widget<MemoryPage, FakeClient>;

// ============================================================================
// FIXTURES
// ============================================================================

/// Default configuration pointed at a test origin.
pub fn config() -> SearchConfig {
    SearchConfig {
        origin: Some(Url::parse("https://cms.test").unwrap()),
        ..SearchConfig::default()
    }
}

pub fn config_with(collections: &[&str]) -> SearchConfig {
    SearchConfig {
        collections: collections.iter().map(|c| c.to_string()).collect(),
        ..config()
    }
}

/// Page carrying the default mount nodes.
pub fn page() -> Arc<MemoryPage> {
    Arc::new(MemoryPage::with_widget_nodes(INPUT, RESULTS, LIST))
}

/// Mount on a fresh page with a fresh client.
pub fn mount(config: SearchConfig) -> (TestWidget, Arc<MemoryPage>, Arc<FakeClient>) {
    let page = page();
    let client = Arc::new(FakeClient::new());
    let widget = Widget::mount(config, Arc::clone(&page), Arc::clone(&client)).unwrap();
    (widget, page, client)
}

/// Let debounced and spawned work run. Meant for paused-clock tests.
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub fn titles(items: &[globalsearch::ResultItem]) -> Vec<&str> {
    items.iter().map(|item| item.title.as_str()).collect()
}
