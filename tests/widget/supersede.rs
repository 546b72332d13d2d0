//! Newer input always wins over older in-flight searches.

use super::common::{advance, config_with, entry, mount, titles, LIST, PAST_DEBOUNCE, RESULTS};
use globalsearch::RenderState;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn slow_stale_search_never_overwrites_newer_results() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.respond_after("pages", "slow", Duration::from_millis(500), vec![entry("/s", "Stale", "", "")]);
    client.respond("pages", "fast", vec![entry("/f", "Fresh", "", "")]);

    tokio::join!(widget.handle_input("slow"), async {
        advance(Duration::from_millis(10)).await;
        widget.handle_input("fast").await;
    });
    // Give any straggler a chance to land
    advance(Duration::from_secs(1)).await;

    let snapshot = widget.snapshot();
    let RenderState::Populated(items) = &snapshot.state else {
        panic!("expected results, got {:?}", snapshot.state);
    };
    assert_eq!(titles(items), ["Fresh"]);
    assert_eq!(snapshot.query, "fast");
    assert!(!page.inner_html(LIST).unwrap().contains("Stale"));
    assert_eq!(client.finished_count(), 1, "stale request was not aborted");
}

#[tokio::test(start_paused = true)]
async fn stale_search_cannot_land_after_newer_results() {
    let (widget, _page, client) = mount(config_with(&["pages", "place"]));
    client.respond_after("pages", "tea", Duration::from_millis(800), vec![entry("/1", "Old pages", "", "")]);
    client.respond("place", "tea", vec![entry("/2", "Old place", "", "")]);
    client.respond_after("pages", "teapot", Duration::from_millis(50), vec![entry("/3", "Teapot", "", "")]);

    widget.on_input("tea");
    advance(PAST_DEBOUNCE).await;
    assert_eq!(widget.snapshot().state, RenderState::Loading);

    widget.on_input("teapot");
    advance(PAST_DEBOUNCE).await;
    advance(Duration::from_secs(1)).await;

    let RenderState::Populated(items) = widget.snapshot().state else {
        panic!("expected results");
    };
    assert_eq!(titles(&items), ["Teapot"]);
    // place/tea, pages/teapot and place/teapot; pages/tea was aborted
    assert_eq!(client.finished_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_cancels_the_search_in_flight() {
    let (widget, page, client) = mount(config_with(&["pages"]));
    client.respond_after("pages", "q", Duration::from_millis(500), vec![entry("/a", "A", "", "")]);

    tokio::join!(widget.handle_input("q"), async {
        advance(Duration::from_millis(10)).await;
        widget.handle_input("   ").await;
    });
    advance(Duration::from_secs(1)).await;

    assert_eq!(widget.snapshot().state, RenderState::Idle);
    assert_eq!(page.inner_html(LIST).unwrap(), "");
    assert!(!page.is_shown(RESULTS));
    assert_eq!(client.finished_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn failure_of_a_superseded_search_is_never_shown() {
    let (widget, _page, client) = mount(config_with(&["pages"]));
    client.fail_after("pages", "old", Duration::from_millis(100), 500);
    client.respond_after("pages", "new", Duration::from_millis(300), vec![entry("/n", "New", "", "")]);

    tokio::join!(widget.handle_input("old"), async {
        advance(Duration::from_millis(10)).await;
        widget.handle_input("new").await;
    });

    let snapshot = widget.snapshot();
    assert!(matches!(snapshot.state, RenderState::Populated(_)), "got {:?}", snapshot.state);
    assert!(snapshot.visible);
}

#[tokio::test(start_paused = true)]
async fn every_render_reaches_subscribers() {
    let (widget, _page, client) = mount(config_with(&["pages"]));
    client.respond_after("pages", "q", Duration::from_millis(100), vec![entry("/a", "A", "", "")]);
    let mut renders = widget.subscribe();

    let watcher = async {
        let mut seen = Vec::new();
        while renders.changed().await.is_ok() {
            let state = renders.borrow_and_update().state.clone();
            let done = matches!(state, RenderState::Populated(_));
            seen.push(state.name());
            if done {
                break;
            }
        }
        seen
    };
    let ((), seen) = tokio::join!(widget.handle_input("q"), watcher);

    assert_eq!(seen, ["loading", "populated"]);
}
