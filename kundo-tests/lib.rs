//! Shared fixtures for Kundo integration tests
//!
//! A wiremock server stands in for OMDb so the real provider, service and
//! router run end to end without network access.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use kundo_core::KundoConfig;
use kundo_search::{MovieSearchService, OmdbProvider};
use kundo_web::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key the fake OMDb expects on every call.
pub const TEST_API_KEY: &str = "test-api-key";

/// Fake OMDb endpoint.
pub struct FakeOmdb {
    server: MockServer,
}

impl FakeOmdb {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Answers `s=<query>&page=<page>` with `body`.
    pub async fn on_search(&self, query: &str, page: u32, body: Value) {
        Mock::given(method("GET"))
            .and(query_param("apikey", TEST_API_KEY))
            .and(query_param("s", query))
            .and(query_param("page", page.to_string()))
            .and(query_param("type", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answers `i=<imdb_id>` with `body`.
    pub async fn on_details(&self, imdb_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(query_param("apikey", TEST_API_KEY))
            .and(query_param("i", imdb_id))
            .and(query_param("plot", "full"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Every request fails with `status`.
    pub async fn fail_with(&self, status: u16) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests OMDb has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Production service pointed at this fake.
    pub fn service(&self) -> MovieSearchService {
        let provider = OmdbProvider::with_endpoint(&self.uri(), TEST_API_KEY, None)
            .expect("fake OMDb endpoint is a valid URL");
        MovieSearchService::new(Arc::new(provider))
    }

    /// Full application router backed by this fake.
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.service(), KundoConfig::for_testing()))
    }
}

/// One-entry search page for Blade Runner.
pub fn blade_runner_search() -> Value {
    json!({
        "Search": [{
            "Title": "Blade Runner",
            "Year": "1982",
            "imdbID": "tt0083658",
            "Type": "movie",
            "Poster": "https://m.media-amazon.com/images/blade-runner.jpg"
        }],
        "totalResults": "1",
        "Response": "True"
    })
}

/// Search page of ten generated entries out of `total`.
pub fn numbered_search(prefix: &str, page: u32, total: u32) -> Value {
    let first = (page - 1) * 10;
    let entries: Vec<Value> = (first..(first + 10).min(total))
        .map(|n| {
            json!({
                "Title": format!("{prefix} {n}"),
                "Year": "2000",
                "imdbID": format!("tt{n:07}"),
                "Poster": "N/A"
            })
        })
        .collect();
    json!({
        "Search": entries,
        "totalResults": total.to_string(),
        "Response": "True"
    })
}

/// Full record for Blade Runner with both ratings.
pub fn blade_runner_details() -> Value {
    json!({
        "Title": "Blade Runner",
        "Year": "1982",
        "Rated": "R",
        "Runtime": "117 min",
        "Genre": "Action, Drama, Sci-Fi",
        "Director": "Ridley Scott",
        "Writer": "Hampton Fancher, David Webb Peoples",
        "Actors": "Harrison Ford, Rutger Hauer, Sean Young",
        "Plot": "A blade runner must pursue and terminate four replicants.",
        "Language": "English",
        "Released": "25 Jun 1982",
        "Awards": "Nominated for 2 Oscars",
        "Type": "movie",
        "Poster": "N/A",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "8.1/10"},
            {"Source": "Rotten Tomatoes", "Value": "89%"},
            {"Source": "Metacritic", "Value": "84/100"}
        ],
        "imdbID": "tt0083658",
        "Response": "True"
    })
}

/// Negative provider answer.
pub fn provider_error(message: &str) -> Value {
    json!({"Response": "False", "Error": message})
}

/// Response parts collected from a router call.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// Sends `GET uri` through `router` without a socket.
pub async fn fetch(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    let response = router.oneshot(request).await.expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
