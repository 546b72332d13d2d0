//! End-to-end widget scenarios against an in-memory page.

use super::common::{
    advance, config, config_with, entry, mount, page, titles, FakeClient, INPUT, LIST, PAST_DEBOUNCE,
    RESULTS,
};
use globalsearch::render::STYLE_MARKER;
use globalsearch::testing::ANY_QUERY;
use globalsearch::{
    ClickTarget, LocaleMessages, MemoryPage, MountError, MountIds, RenderState, ResultItem,
    SearchConfig, Widget,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// MOUNTING
// ============================================================================

#[tokio::test]
async fn mount_prepares_the_page() {
    let (widget, page, client) = mount(config());

    let input = page.element(INPUT).unwrap();
    assert_eq!(
        input.attributes.get("placeholder").map(String::as_str),
        Some("Type to search...")
    );
    assert_eq!(page.style_count(STYLE_MARKER), 1);
    assert!(!page.is_shown(RESULTS));
    assert_eq!(widget.snapshot().state, RenderState::Idle);
    assert_eq!(widget.locale(), "en");
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn missing_mount_node_fails_without_touching_the_page() {
    let page = Arc::new(MemoryPage::with_widget_nodes(INPUT, RESULTS, "some-other-list"));
    let client = Arc::new(FakeClient::new());

    let err = Widget::mount(config(), Arc::clone(&page), client).unwrap_err();
    assert!(matches!(err, MountError::MissingElement { ref id, .. } if id == LIST));
    assert_eq!(page.style_count(STYLE_MARKER), 0);
    assert!(page.element(INPUT).unwrap().attributes.is_empty());
}

#[test]
fn mount_outside_a_runtime_fails() {
    let client = Arc::new(FakeClient::new());
    let err = Widget::mount(config(), page(), client).unwrap_err();
    assert!(matches!(err, MountError::NoRuntime));
}

#[tokio::test]
async fn relative_api_base_without_origin_is_rejected() {
    let client = Arc::new(FakeClient::new());
    let err = Widget::mount(SearchConfig::default(), page(), client).unwrap_err();
    assert!(matches!(err, MountError::Config(_)));
}

#[tokio::test]
async fn style_is_injected_once_per_page() {
    let page = page();
    page.add_element("second-input", None);
    page.add_element("second-results", None);
    page.add_element("second-list", Some("second-results"));

    let first_client = Arc::new(FakeClient::new());
    first_client.respond("pages", "tea", vec![entry("/tea", "Tea", "Pages", "Page")]);
    let first = Widget::mount(config_with(&["pages"]), Arc::clone(&page), first_client).unwrap();

    let second_config = SearchConfig {
        mount: MountIds {
            input: "second-input".to_string(),
            results: "second-results".to_string(),
            list: "second-list".to_string(),
        },
        ..config_with(&["pages"])
    };
    let second_client = Arc::new(FakeClient::new());
    let second = Widget::mount(second_config, Arc::clone(&page), Arc::clone(&second_client)).unwrap();

    assert_eq!(page.style_count(STYLE_MARKER), 1);

    // Instances keep their own state
    first.handle_input("tea").await;
    assert!(matches!(first.snapshot().state, RenderState::Populated(_)));
    assert_eq!(second.snapshot().state, RenderState::Idle);
    assert!(second_client.requests().is_empty());
    assert_eq!(page.inner_html("second-list").unwrap(), "");
}

// ============================================================================
// RENDERING
// ============================================================================

#[tokio::test(start_paused = true)]
async fn typing_a_word_renders_its_results() {
    let (widget, page, client) = mount(config());
    client.respond("pages", "hello", vec![entry("/a", "Hello World", "Pages", "Page")]);

    for prefix in ["h", "he", "hel", "hell", "hello"] {
        widget.on_input(prefix);
        advance(Duration::from_millis(50)).await;
    }
    advance(PAST_DEBOUNCE).await;

    let requests = client.requests();
    assert_eq!(requests.len(), 3, "one request per collection");
    assert!(client.queries().iter().all(|q| q == "hello"));

    let snapshot = widget.snapshot();
    let RenderState::Populated(items) = &snapshot.state else {
        panic!("expected results, got {:?}", snapshot.state);
    };
    assert_eq!(titles(items), ["Hello World"]);
    assert_eq!(snapshot.query, "hello");

    let html = page.inner_html(LIST).unwrap();
    assert!(html.contains(r#"<a href="/a" target="_self">"#));
    assert!(html.contains("<h3>Hello World</h3>"));
    assert!(html.contains("<p>Pages - Page</p>"));
    assert!(page.is_shown(RESULTS));
}

#[tokio::test]
async fn results_keep_collection_order() {
    let (widget, _page, client) = mount(config());
    client.respond("pages", "tea", vec![entry("/p", "Pages hit", "Pages", "Page")]);
    client.respond(
        "experience",
        "tea",
        vec![entry("/e1", "Tea ceremony", "Experience", "Event"), entry("/e2", "Tea walk", "Experience", "Event")],
    );
    client.respond("place", "tea", vec![entry("/pl", "Tea house", "Place", "Venue")]);

    widget.handle_input("tea").await;

    let RenderState::Populated(items) = widget.snapshot().state else {
        panic!("expected results");
    };
    assert_eq!(titles(&items), ["Tea ceremony", "Tea walk", "Tea house", "Pages hit"]);
}

#[tokio::test]
async fn no_matches_render_localized_empty_message() {
    let page = Arc::new(MemoryPage::with_widget_nodes(INPUT, RESULTS, LIST).with_lang("ar"));
    let client = Arc::new(FakeClient::new());
    let widget = Widget::mount(config(), Arc::clone(&page), client).unwrap();

    widget.handle_input("zzz").await;

    assert_eq!(widget.snapshot().state, RenderState::Empty);
    let html = page.inner_html(LIST).unwrap();
    assert!(html.contains(&LocaleMessages::arabic().no_results));
    assert!(html.contains(r#"class="no-results""#));
    assert!(page.is_shown(RESULTS));
}

#[tokio::test]
async fn failed_collection_renders_generic_error() {
    let (widget, page, client) = mount(config());
    client.respond("pages", "q", vec![entry("/a", "A", "Pages", "Page")]);
    client.fail("place", "q", 500);

    widget.handle_input("q").await;

    assert_eq!(widget.snapshot().state, RenderState::Error);
    let html = page.inner_html(LIST).unwrap();
    assert!(html.contains(&LocaleMessages::english().error));
    assert!(!html.contains("500"));
    assert!(!html.contains("place"));
}

#[tokio::test]
async fn transport_failure_renders_generic_error() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.disconnect("pages", "q", "connection reset by peer");

    widget.handle_input("q").await;

    assert_eq!(widget.snapshot().state, RenderState::Error);
    assert!(!page.inner_html(LIST).unwrap().contains("reset"));
}

#[tokio::test]
async fn cms_text_is_escaped() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.respond(
        "pages",
        "x",
        vec![entry("/a?b=1&c=\"2\"", "<script>alert(1)</script>", "Pages", "Page")],
    );

    widget.handle_input("x").await;

    let html = page.inner_html(LIST).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains(r#"href="/a?b=1&amp;c=&quot;2&quot;""#));
}

#[tokio::test]
async fn max_results_caps_the_list() {
    let config = SearchConfig {
        max_results: Some(2),
        ..config_with(&["pages", "place"])
    };
    let (widget, _page, client) = mount(config);
    client.respond("pages", "q", vec![entry("/1", "One", "", ""), entry("/2", "Two", "", "")]);
    client.respond("place", "q", vec![entry("/3", "Three", "", "")]);

    widget.handle_input("q").await;

    let RenderState::Populated(items) = widget.snapshot().state else {
        panic!("expected results");
    };
    assert_eq!(titles(&items), ["One", "Two"]);
}

#[tokio::test]
async fn lenient_records_still_render() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.respond("pages", "q", vec![serde_json::json!({ "title": "Untitled link" })]);

    widget.handle_input("q").await;

    let RenderState::Populated(items) = widget.snapshot().state else {
        panic!("expected results");
    };
    assert_eq!(
        items,
        [ResultItem {
            url: String::new(),
            title: "Untitled link".to_string(),
            collection_title: String::new(),
            blueprint_title: String::new(),
        }]
    );
    assert!(page.inner_html(LIST).unwrap().contains(r#"<a href="" target="_self">"#));
}

// ============================================================================
// LOCALE
// ============================================================================

#[tokio::test]
async fn page_language_picks_messages_and_spinner_side() {
    let page = Arc::new(MemoryPage::with_widget_nodes(INPUT, RESULTS, LIST).with_lang("ar-EG"));
    let widget = Widget::mount(config(), Arc::clone(&page), Arc::new(FakeClient::new())).unwrap();

    assert_eq!(widget.locale(), "ar-EG");
    assert_eq!(widget.messages(), &LocaleMessages::arabic());
    let input = page.element(INPUT).unwrap();
    assert_eq!(input.attributes.get("placeholder"), Some(&LocaleMessages::arabic().placeholder));
    assert!(page.style(STYLE_MARKER).unwrap().contains("margin-left: 8px"));
}

#[tokio::test]
async fn configured_locale_wins_over_page_language() {
    let page = Arc::new(MemoryPage::with_widget_nodes(INPUT, RESULTS, LIST).with_lang("ar"));
    let config = SearchConfig {
        locale: Some("en".to_string()),
        ..config()
    };
    let client = Arc::new(FakeClient::new());
    let widget = Widget::mount(config, page, Arc::clone(&client)).unwrap();

    widget.handle_input("q").await;

    assert_eq!(widget.messages(), &LocaleMessages::english());
    let url = &client.requests()[0];
    assert!(url.query_pairs().any(|(k, v)| k == "filter[locale:is]" && v == "en"));
}

// ============================================================================
// DISMISSAL
// ============================================================================

#[tokio::test]
async fn outside_click_hides_results_until_next_search() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    page.add_element("footer", None);
    page.add_element("first-hit", Some(LIST));
    client.respond("pages", ANY_QUERY, vec![entry("/a", "A", "Pages", "Page")]);

    widget.handle_input("a").await;
    assert!(page.is_shown(RESULTS));

    // Clicks inside the widget leave it open
    widget.on_document_click(&ClickTarget::element(INPUT));
    widget.on_document_click(&ClickTarget::element("first-hit"));
    assert!(page.is_shown(RESULTS));

    widget.on_document_click(&ClickTarget::element("footer"));
    assert!(!page.is_shown(RESULTS));
    let snapshot = widget.snapshot();
    assert!(!snapshot.visible);
    assert!(matches!(snapshot.state, RenderState::Populated(_)), "state is kept");

    // Clicking back into the results does not reopen them
    widget.on_document_click(&ClickTarget::element("first-hit"));
    assert!(!page.is_shown(RESULTS));

    widget.on_document_click(&ClickTarget::anonymous());
    assert!(!page.is_shown(RESULTS));

    widget.handle_input("ab").await;
    assert!(page.is_shown(RESULTS));
}
