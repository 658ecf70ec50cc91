//! Movie search and details service
//!
//! Validates input before any provider call and maps provider outcomes
//! onto what the API and the search page show.

use std::sync::Arc;

use async_trait::async_trait;
use kundo_core::search::GENERIC_SEARCH_ERROR;
use kundo_core::search::state::FetchOutcome;
use kundo_core::{KundoConfig, KundoError, RuntimeMode, SearchSource};
use tracing::{debug, warn};

use crate::errors::MovieSearchError;
use crate::providers::{DemoProvider, MovieProvider, OmdbProvider};
use crate::types::{MovieDetails, SearchResponse};

/// Movie lookup service shared by every request handler.
#[derive(Debug, Clone)]
pub struct MovieSearchService {
    provider: Arc<dyn MovieProvider>,
}

impl MovieSearchService {
    /// Creates a service over the given provider.
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self { provider }
    }

    /// Creates a service answering from the offline demo catalog.
    pub fn demo() -> Self {
        Self::new(Arc::new(DemoProvider::new()))
    }

    /// Picks the provider for the runtime mode.
    ///
    /// Production always talks to OMDb. Development talks to OMDb when a key
    /// is configured and falls back to the demo catalog otherwise.
    ///
    /// # Errors
    ///
    /// - `KundoError::Configuration` - Production without an API key, or an unusable OMDb endpoint
    pub fn from_config(config: &KundoConfig, mode: RuntimeMode) -> Result<Self, KundoError> {
        config.validate(mode)?;
        if config.omdb.api_key.is_none() {
            warn!("OMDB_API_KEY not set, serving the demo catalog");
            return Ok(Self::demo());
        }
        let provider = OmdbProvider::from_config(&config.omdb)?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Search movies by title.
    ///
    /// # Errors
    /// - `MovieSearchError::EmptyQuery` - Query is blank; the provider is not called
    /// - `MovieSearchError::NotFound` - Provider reported no match
    /// - `MovieSearchError::Transport` - Provider unreachable or failing
    /// - `MovieSearchError::InvalidResponse` - Provider body could not be decoded
    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResponse, MovieSearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MovieSearchError::EmptyQuery);
        }

        let result = self.provider.search(query, page.max(1)).await;
        log_failure(&result);
        result
    }

    /// Fetch the full record of one movie.
    ///
    /// # Errors
    /// - `MovieSearchError::EmptyId` - Id is blank; the provider is not called
    /// - `MovieSearchError::NotFound` - Unknown id
    /// - `MovieSearchError::Transport` - Provider unreachable or failing
    /// - `MovieSearchError::InvalidResponse` - Provider body could not be decoded
    pub async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetails, MovieSearchError> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Err(MovieSearchError::EmptyId);
        }

        let result = self.provider.details(imdb_id).await;
        log_failure(&result);
        result
    }
}

fn log_failure<T>(result: &Result<T, MovieSearchError>) {
    match result {
        Err(e @ (MovieSearchError::Transport { .. } | MovieSearchError::InvalidResponse { .. })) => {
            warn!(error = %e, "Movie provider failed");
        }
        Err(e) => debug!(error = %e, "Movie lookup returned nothing"),
        Ok(_) => {}
    }
}

#[async_trait]
impl SearchSource for MovieSearchService {
    async fn fetch_page(&self, query: &str, page: u32) -> FetchOutcome {
        match self.search_movies(query, page).await {
            Ok(response) => FetchOutcome::Found {
                total_results: response.total_results(),
                results: response.search,
            },
            Err(e) => {
                let message = e.user_message();
                FetchOutcome::Failed {
                    message: if message.trim().is_empty() {
                        GENERIC_SEARCH_ERROR.to_string()
                    } else {
                        message
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieProvider for CountingProvider {
        async fn search(
            &self,
            query: &str,
            page: u32,
        ) -> Result<SearchResponse, MovieSearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DemoProvider.search(query, page).await
        }

        async fn details(&self, imdb_id: &str) -> Result<MovieDetails, MovieSearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DemoProvider.details(imdb_id).await
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_provider() {
        let provider = Arc::new(CountingProvider::default());
        let service = MovieSearchService::new(provider.clone());

        assert!(matches!(
            service.search_movies("   ", 1).await,
            Err(MovieSearchError::EmptyQuery)
        ));
        assert!(matches!(
            service.movie_details("").await,
            Err(MovieSearchError::EmptyId)
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let service = MovieSearchService::demo();
        let response = service.search_movies("  Blade Runner  ", 1).await.unwrap();
        assert_eq!(response.search[0].imdb_id, "tt0083658");
    }

    #[tokio::test]
    async fn test_search_source_folds_errors_into_messages() {
        let service = MovieSearchService::demo();

        let outcome = service.fetch_page("Blade Runner", 1).await;
        assert!(matches!(outcome, FetchOutcome::Found { total_results: 2, .. }));

        let outcome = service.fetch_page("qwertyuiop", 1).await;
        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                message: "Movie not found!".to_string()
            }
        );
    }

    #[derive(Debug)]
    struct SilentProvider;

    #[async_trait]
    impl MovieProvider for SilentProvider {
        async fn search(&self, _: &str, _: u32) -> Result<SearchResponse, MovieSearchError> {
            Err(MovieSearchError::NotFound {
                message: String::new(),
            })
        }

        async fn details(&self, _: &str) -> Result<MovieDetails, MovieSearchError> {
            Err(MovieSearchError::NotFound {
                message: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_blank_provider_message_falls_back_to_generic() {
        let service = MovieSearchService::new(Arc::new(SilentProvider));
        assert_eq!(
            service.fetch_page("alien", 1).await,
            FetchOutcome::Failed {
                message: GENERIC_SEARCH_ERROR.to_string()
            }
        );
    }

    #[test]
    fn test_production_requires_key() {
        let config = KundoConfig::default();
        let result = MovieSearchService::from_config(&config, RuntimeMode::Production);
        assert!(matches!(result, Err(KundoError::Configuration { .. })));

        assert!(MovieSearchService::from_config(&config, RuntimeMode::Development).is_ok());
    }
}
