//! Keystroke coalescing as seen from the network.

use super::common::{advance, config, config_with, entry, mount, LIST, PAST_DEBOUNCE, RESULTS};
use globalsearch::{LocaleMessages, RenderState, SearchConfig};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_issue_one_fan_out() {
    let (widget, _page, client) = mount(config());

    for prefix in ["a", "ab", "abc"] {
        widget.on_input(prefix);
        advance(Duration::from_millis(100)).await;
    }
    advance(PAST_DEBOUNCE).await;

    assert_eq!(client.queries(), ["abc", "abc", "abc"]);
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_the_delay_search_again() {
    let (widget, _page, client) = mount(config_with(&["pages"]));

    widget.on_input("tea");
    advance(PAST_DEBOUNCE).await;
    widget.on_input("teapot");
    advance(PAST_DEBOUNCE).await;

    assert_eq!(client.queries(), ["tea", "teapot"]);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_sent_before_the_delay_elapses() {
    let (widget, _page, client) = mount(config());

    widget.on_input("hello");
    advance(Duration::from_millis(250)).await;
    assert!(client.requests().is_empty());
    assert_eq!(widget.snapshot().state, RenderState::Idle);

    advance(Duration::from_millis(100)).await;
    assert_eq!(client.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn whitespace_query_sends_nothing_and_stays_idle() {
    let (widget, page, client) = mount(config());

    widget.on_input("   ");
    advance(PAST_DEBOUNCE).await;

    assert!(client.requests().is_empty());
    assert_eq!(widget.snapshot().state, RenderState::Idle);
    assert_eq!(page.inner_html(LIST).unwrap(), "");
    assert!(!page.is_shown(RESULTS));
}

#[tokio::test(start_paused = true)]
async fn query_is_trimmed_before_sending() {
    let (widget, _page, client) = mount(config_with(&["pages"]));

    widget.on_input("  tea  ");
    advance(PAST_DEBOUNCE).await;

    assert_eq!(client.queries(), ["tea"]);
    assert_eq!(widget.snapshot().query, "tea");
}

#[tokio::test(start_paused = true)]
async fn configured_delay_is_honored() {
    let config = SearchConfig {
        debounce_ms: 50,
        ..config_with(&["pages"])
    };
    let (widget, _page, client) = mount(config);

    widget.on_input("q");
    advance(Duration::from_millis(60)).await;

    assert_eq!(client.queries(), ["q"]);
}

#[tokio::test(start_paused = true)]
async fn loading_state_is_shown_while_requests_are_in_flight() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.respond_after("pages", "q", Duration::from_millis(200), vec![entry("/a", "A", "", "")]);

    widget.on_input("q");
    advance(Duration::from_millis(310)).await;

    assert_eq!(widget.snapshot().state, RenderState::Loading);
    let html = page.inner_html(LIST).unwrap();
    assert!(html.contains(r#"class="loading-state""#));
    assert!(html.contains(&LocaleMessages::english().searching));
    assert!(page.is_shown(RESULTS));

    advance(Duration::from_millis(300)).await;
    assert!(matches!(widget.snapshot().state, RenderState::Populated(_)));
}
