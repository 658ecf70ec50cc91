//! Provider implementations for movie lookups.

use async_trait::async_trait;

use crate::errors::MovieSearchError;
use crate::types::{MovieDetails, SearchResponse};

pub mod demo;
pub mod omdb;

pub use demo::DemoProvider;
pub use omdb::OmdbProvider;

/// Trait for movie database providers.
///
/// Implementations provide title search and per-movie details through
/// different backends (the OMDb API, the offline demo catalog).
#[async_trait]
pub trait MovieProvider: Send + Sync + std::fmt::Debug {
    /// Search movies by title, one provider page at a time.
    ///
    /// # Errors
    /// - `MovieSearchError::NotFound` - Provider reported no match
    /// - `MovieSearchError::Transport` - Network or HTTP status failure
    /// - `MovieSearchError::InvalidResponse` - Body could not be decoded
    async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, MovieSearchError>;

    /// Fetch the full record of one movie.
    ///
    /// # Errors
    /// - `MovieSearchError::NotFound` - Unknown id
    /// - `MovieSearchError::Transport` - Network or HTTP status failure
    /// - `MovieSearchError::InvalidResponse` - Body could not be decoded
    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, MovieSearchError>;
}
