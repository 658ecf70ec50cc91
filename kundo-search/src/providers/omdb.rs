//! OMDb API provider for production use.

use std::time::Duration;

use async_trait::async_trait;
use kundo_core::KundoError;
use kundo_core::config::OmdbConfig;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::MovieProvider;
use crate::errors::{Lookup, MovieSearchError};
use crate::types::{MovieDetails, RESPONSE_TRUE, SearchResponse};

/// OMDb provider backed by `reqwest`.
///
/// Search calls look like `?apikey=..&s=..&page=..&type=movie`, detail
/// calls like `?apikey=..&i=..&plot=full`.
#[derive(Debug, Clone)]
pub struct OmdbProvider {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl OmdbProvider {
    /// Create provider from configuration.
    ///
    /// # Errors
    ///
    /// - `KundoError::Configuration` - Missing API key, unusable base URL or HTTP client setup failure
    pub fn from_config(config: &OmdbConfig) -> Result<Self, KundoError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| KundoError::Configuration {
                reason: "OMDB_API_KEY is not defined in environment variables".to_string(),
            })?;
        Self::with_endpoint(&config.base_url, api_key, config.request_timeout)
    }

    /// Create provider for an explicit endpoint.
    ///
    /// # Errors
    ///
    /// - `KundoError::Configuration` - Unusable base URL or HTTP client setup failure
    pub fn with_endpoint(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, KundoError> {
        let base_url = Url::parse(base_url).map_err(|e| KundoError::Configuration {
            reason: format!("Invalid OMDb base URL '{base_url}': {e}"),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| KundoError::Configuration {
            reason: format!("HTTP client setup failed: {e}"),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .extend_pairs(params);
        url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        lookup: Lookup,
        params: &[(&str, &str)],
    ) -> Result<T, MovieSearchError> {
        let url = self.url(params);
        debug!(?lookup, ?params, "OMDb request");

        let response = self.client.get(url).send().await.map_err(|e| {
            MovieSearchError::Transport {
                lookup,
                reason: format!("HTTP request failed: {e}"),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MovieSearchError::Transport {
                lookup,
                reason: format!("HTTP error! status: {status}"),
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| MovieSearchError::InvalidResponse {
                    lookup,
                    reason: format!("JSON parsing failed: {e}"),
                })?;

        if body.get("Response").and_then(|v| v.as_str()) != Some(RESPONSE_TRUE) {
            return Err(MovieSearchError::NotFound {
                message: body
                    .get("Error")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        serde_json::from_value(body).map_err(|e| MovieSearchError::InvalidResponse {
            lookup,
            reason: format!("Unexpected body shape: {e}"),
        })
    }
}

#[async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, MovieSearchError> {
        let page = page.to_string();
        self.fetch(
            Lookup::Search,
            &[("s", query), ("page", &page), ("type", "movie")],
        )
        .await
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, MovieSearchError> {
        self.fetch(Lookup::Details, &[("i", imdb_id), ("plot", "full")])
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn provider(server: &MockServer) -> OmdbProvider {
        OmdbProvider::with_endpoint(&format!("{}/", server.uri()), "test-api-key", None).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_expected_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("apikey", "test-api-key"))
            .and(query_param("s", "Blade Runner"))
            .and(query_param("page", "2"))
            .and(query_param("type", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Search": [{
                    "Title": "Blade Runner",
                    "Year": "1982",
                    "imdbID": "tt0083658",
                    "Poster": "https://example.com/poster.jpg"
                }],
                "totalResults": "11",
                "Response": "True"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server).await.search("Blade Runner", 2).await.unwrap();

        assert_eq!(result.search[0].imdb_id, "tt0083658");
        assert_eq!(result.total_results(), 11);
    }

    #[tokio::test]
    async fn test_details_request_full_plot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("i", "tt0083658"))
            .and(query_param("plot", "full"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Title": "Blade Runner",
                "Year": "1982",
                "Ratings": [{"Source": "Internet Movie Database", "Value": "8.1/10"}],
                "Response": "True"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let details = provider(&server).await.details("tt0083658").await.unwrap();

        assert_eq!(details.title, "Blade Runner");
        assert_eq!(details.ratings.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_response_carries_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Response": "False",
                "Error": "Movie not found!"
            })))
            .mount(&server)
            .await;

        let error = provider(&server).await.search("qwertyuiop", 1).await.unwrap_err();

        assert!(matches!(
            error,
            MovieSearchError::NotFound { ref message } if message == "Movie not found!"
        ));
    }

    #[tokio::test]
    async fn test_http_status_failure_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = provider(&server).await.details("tt0083658").await.unwrap_err();

        assert!(matches!(
            error,
            MovieSearchError::Transport {
                lookup: Lookup::Details,
                ..
            }
        ));
        assert_eq!(error.user_message(), "Failed to fetch movie details");
    }

    #[tokio::test]
    async fn test_garbage_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = provider(&server).await.search("alien", 1).await.unwrap_err();

        assert!(matches!(error, MovieSearchError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let provider =
            OmdbProvider::with_endpoint("http://127.0.0.1:9/", "test-api-key", None).unwrap();

        let error = provider.search("alien", 1).await.unwrap_err();

        assert_eq!(error.user_message(), "Failed to fetch search results");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = OmdbProvider::from_config(&OmdbConfig::default());
        assert!(matches!(result, Err(KundoError::Configuration { .. })));
    }
}
