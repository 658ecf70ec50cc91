//! JSON API against a fake OMDb

use axum::http::StatusCode;
use kundo_tests::{
    FakeOmdb, blade_runner_details, blade_runner_search, fetch, numbered_search, provider_error,
};
use serde_json::json;

#[tokio::test]
async fn test_search_passes_provider_body_through() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("Blade Runner", 1, blade_runner_search()).await;

    let response = fetch(omdb.router(), "/api/movies/search?q=Blade%20Runner").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["Response"], "True");
    assert_eq!(body["totalResults"], "1");
    assert_eq!(body["Search"][0]["imdbID"], "tt0083658");
    assert_eq!(body["Search"][0]["Year"], "1982");
    assert_eq!(body["Search"][0]["Type"], "movie");
    assert_eq!(body, blade_runner_search());
}

#[tokio::test]
async fn test_search_forwards_page() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("alien", 3, numbered_search("Alien", 3, 25)).await;

    let response = fetch(omdb.router(), "/api/movies/search?q=alien&page=3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["Search"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_validation_never_reaches_provider() {
    let omdb = FakeOmdb::start().await;

    for uri in [
        "/api/movies/search",
        "/api/movies/search?q=",
        "/api/movies/search?q=alien&page=0",
        "/api/movies/search?q=alien&page=two",
        "/api/movies/%20",
    ] {
        let response = fetch(omdb.router(), uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.json()["Response"], "False");
    }
    assert_eq!(omdb.request_count().await, 0);
}

#[tokio::test]
async fn test_provider_negative_is_404_with_its_message() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("zzzzzz", 1, provider_error("Movie not found!")).await;

    let response = fetch(omdb.router(), "/api/movies/search?q=zzzzzz").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({"Response": "False", "Error": "Movie not found!"})
    );
}

#[tokio::test]
async fn test_provider_outage_hides_details() {
    let omdb = FakeOmdb::start().await;
    omdb.fail_with(503).await;

    let search = fetch(omdb.router(), "/api/movies/search?q=alien").await;
    assert_eq!(search.status, StatusCode::NOT_FOUND);
    assert_eq!(search.json()["Error"], "Failed to fetch search results");

    let details = fetch(omdb.router(), "/api/movies/tt0083658").await;
    assert_eq!(details.status, StatusCode::NOT_FOUND);
    assert_eq!(details.json()["Error"], "Failed to fetch movie details");
}

#[tokio::test]
async fn test_details_round_trip() {
    let omdb = FakeOmdb::start().await;
    omdb.on_details("tt0083658", blade_runner_details()).await;
    omdb.on_details("tt9999999", provider_error("Incorrect IMDb ID.")).await;

    let found = fetch(omdb.router(), "/api/movies/tt0083658").await;
    assert_eq!(found.status, StatusCode::OK);
    let body = found.json();
    assert_eq!(body["Title"], "Blade Runner");
    assert_eq!(body["Ratings"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["Awards"], "Nominated for 2 Oscars");
    assert_eq!(body, blade_runner_details());

    let missing = fetch(omdb.router(), "/api/movies/tt9999999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["Error"], "Incorrect IMDb ID.");
}

#[tokio::test]
async fn test_served_over_tcp() {
    let omdb = FakeOmdb::start().await;
    omdb.on_search("Blade Runner", 1, blade_runner_search()).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = omdb.router();
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let response = reqwest::Client::new()
        .get(format!("http://{address}/api/movies/search?q=Blade%20Runner"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["Search"][0]["Title"], "Blade Runner");

    server.abort();
}
