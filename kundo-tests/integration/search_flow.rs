//! Search controller driving the real provider stack

use std::sync::Arc;
use std::time::Duration;

use kundo_core::SearchController;
use kundo_core::search::{AddressState, SearchState, SearchView};
use kundo_tests::{FakeOmdb, blade_runner_search, numbered_search, provider_error};
use tokio::time::timeout;

const DEBOUNCE: Duration = Duration::from_millis(100);

async fn settled_on(controller: &SearchController, query: &str, page: u32) -> SearchState {
    let mut states = controller.subscribe();
    timeout(
        Duration::from_secs(5),
        states.wait_for(|s| s.debounced_query == query && s.page == page && !s.loading),
    )
    .await
    .expect("search settles in time")
    .expect("driver alive")
    .clone()
}

#[tokio::test]
async fn test_typing_commits_once_and_updates_address() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("Blade Runner", 1, blade_runner_search()).await;

    let controller = SearchController::spawn(Arc::new(omdb.service()), DEBOUNCE);
    for prefix in ["B", "Bla", "Blade", "Blade Run", "Blade Runner"] {
        controller.edit_query(prefix);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let state = settled_on(&controller, "Blade Runner", 1).await;

    match state.view() {
        SearchView::Results { movies, total, .. } => {
            assert_eq!(total, 1);
            assert_eq!(movies[0].imdb_id, "tt0083658");
        }
        other => panic!("unexpected view {other:?}"),
    }
    assert_eq!(
        controller.address().borrow().to_href(),
        "/?q=Blade%20Runner"
    );
    assert_eq!(omdb.request_count().await, 1);

    controller.shutdown().await;
}

#[tokio::test]
async fn test_paging_through_results() {
    let omdb = FakeOmdb::start().await;
    for page in 1..=3 {
        omdb.on_search("alien", page, numbered_search("Alien", page, 25)).await;
    }

    let controller = SearchController::restore(
        Arc::new(omdb.service()),
        AddressState::new("alien", 1),
        DEBOUNCE,
    );
    let first = settled_on(&controller, "alien", 1).await;
    assert_eq!(first.pagination().total_pages, 3);
    assert!(!first.pagination().has_previous());

    controller.next_page();
    let second = settled_on(&controller, "alien", 2).await;
    assert_eq!(second.results[0].title, "Alien 10");

    controller.request_page(3);
    let third = settled_on(&controller, "alien", 3).await;
    assert_eq!(third.results.len(), 5);
    assert!(!third.pagination().has_next());
    assert_eq!(*controller.address().borrow(), AddressState::new("alien", 3));

    controller.previous_page();
    settled_on(&controller, "alien", 2).await;

    controller.shutdown().await;
}

#[tokio::test]
async fn test_new_query_resets_page_and_clears_error() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("zzzzzz", 1, provider_error("Movie not found!")).await;
    omdb.on_search("Blade Runner", 1, blade_runner_search()).await;

    let controller = SearchController::spawn(Arc::new(omdb.service()), DEBOUNCE);

    controller.edit_query("zzzzzz");
    let failed = settled_on(&controller, "zzzzzz", 1).await;
    assert_eq!(failed.view(), SearchView::Failed("Movie not found!"));

    controller.edit_query("Blade Runner");
    let found = settled_on(&controller, "Blade Runner", 1).await;
    assert_eq!(found.error, None);
    assert_eq!(found.results.len(), 1);

    controller.edit_query("");
    let idle = settled_on(&controller, "", 1).await;
    assert_eq!(idle.view(), SearchView::Idle);
    assert_eq!(controller.address().borrow().to_href(), "/");

    controller.shutdown().await;
}
