//! HTMX pages against a fake OMDb

use axum::http::StatusCode;
use kundo_tests::{
    FakeOmdb, blade_runner_details, blade_runner_search, fetch, numbered_search, provider_error,
};
use kundo_web::handlers::HX_REPLACE_URL;
use serde_json::json;

#[tokio::test]
async fn test_blade_runner_search_fragment() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("Blade Runner", 1, blade_runner_search()).await;

    let response = fetch(omdb.router(), "/htmx/search?q=Blade+Runner").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[HX_REPLACE_URL], "/?q=Blade%20Runner");
    assert!(response.body.contains("Found 1 result<"));
    assert!(response.body.contains(r#"href="/movie/tt0083658""#));
    assert!(response.body.contains("1982"));
    assert!(
        response
            .body
            .contains(r#"src="https://m.media-amazon.com/images/blade-runner.jpg""#)
    );
}

#[tokio::test]
async fn test_shared_address_renders_requested_page() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("star", 2, numbered_search("Star", 2, 42)).await;

    let response = fetch(omdb.router(), "/?q=star&page=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"value="star""#));
    assert!(response.body.contains("Found 42 results"));
    assert!(response.body.contains("Star 10"));
    assert!(response.body.contains(r#"aria-current="page""#));
    assert!(response.body.contains(r#"href="/?q=star&page=3""#));
    assert!(response.body.contains(r#"href="/?q=star""#));
    assert!(!response.body.contains("page=6"));
}

#[tokio::test]
async fn test_empty_query_shows_prompt_without_provider_call() {
    let omdb = FakeOmdb::start().await;

    let page = fetch(omdb.router(), "/").await;
    assert!(page.body.contains("Start typing to search for movies"));
    assert!(page.body.contains("KundOMDb"));
    assert!(page.body.contains(r#"placeholder="Search for movies...""#));

    let fragment = fetch(omdb.router(), "/htmx/search?q=%20%20").await;
    assert!(fragment.body.contains("Start typing to search for movies"));
    assert_eq!(omdb.request_count().await, 0);
}

#[tokio::test]
async fn test_failures_render_messages() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("zzzzzz", 1, provider_error("Movie not found!")).await;
    omdb.on_search(
        "empty",
        1,
        json!({"Search": [], "totalResults": "0", "Response": "True"}),
    )
    .await;

    let negative = fetch(omdb.router(), "/htmx/search?q=zzzzzz").await;
    assert!(negative.body.contains("Movie not found!"));
    assert!(negative.body.contains("text-red-400"));

    let empty = fetch(omdb.router(), "/htmx/search?q=empty").await;
    assert!(empty.body.contains("No movies found for &quot;empty&quot;"));
}

#[tokio::test]
async fn test_outage_shows_generic_message() {
    let omdb = FakeOmdb::start().await;
    omdb.fail_with(500).await;

    let response = fetch(omdb.router(), "/htmx/search?q=alien").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Failed to fetch search results"));
    assert!(!response.body.contains("500"));
}

#[tokio::test]
async fn test_detail_page_with_consensus() {
    let omdb = FakeOmdb::start().await;
    omdb.on_details("tt0083658", blade_runner_details()).await;

    let response = fetch(omdb.router(), "/movie/tt0083658").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Blade Runner - KundOMDb</title>"));
    assert!(response.body.contains("8.1/10"));
    assert!(response.body.contains("89%"));
    assert!(response.body.contains("thumbs up"));
    assert!(response.body.contains("No poster available"));
    assert!(!response.body.contains("84/100"));
}

#[tokio::test]
async fn test_unknown_movie_is_not_found_page() {
    let omdb = FakeOmdb::start().await;
    omdb.on_details("tt9999999", provider_error("Incorrect IMDb ID.")).await;

    let response = fetch(omdb.router(), "/movie/tt9999999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Movie Not Found"));
}
