//! Provider wire types.
//!
//! These mirror the OMDb JSON bodies field for field so the API can hand
//! them back unchanged.

use std::collections::BTreeMap;

use kundo_core::movie::{self, MovieSummary, Rating};
use kundo_core::rating::RatingSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MovieSearchError;

/// `Response` value of a positive provider answer.
pub const RESPONSE_TRUE: &str = "True";

/// `Response` value of a negative provider answer.
pub const RESPONSE_FALSE: &str = "False";

/// One page of title search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matches on this page
    #[serde(rename = "Search", default)]
    pub search: Vec<MovieSummary>,
    /// Total matches across all pages, as a decimal string
    #[serde(rename = "totalResults", default)]
    pub total_results: String,
    /// Always `"True"` for this type
    #[serde(rename = "Response")]
    pub response: String,
}

impl SearchResponse {
    /// Builds a positive response.
    pub fn new(search: Vec<MovieSummary>, total_results: u32) -> Self {
        Self {
            search,
            total_results: total_results.to_string(),
            response: RESPONSE_TRUE.to_string(),
        }
    }

    /// Total match count; an unreadable count is treated as zero.
    pub fn total_results(&self) -> u32 {
        self.total_results.trim().parse().unwrap_or(0)
    }
}

/// Full record for one movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Audience rating such as `R`
    #[serde(rename = "Rated", default)]
    pub rated: String,
    /// Runtime such as `117 min`
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    /// Comma separated genres
    #[serde(rename = "Genre", default)]
    pub genre: String,
    /// Director(s)
    #[serde(rename = "Director", default)]
    pub director: String,
    /// Writer(s)
    #[serde(rename = "Writer", default)]
    pub writer: String,
    /// Main cast
    #[serde(rename = "Actors", default)]
    pub actors: String,
    /// Full plot
    #[serde(rename = "Plot", default)]
    pub plot: String,
    /// Spoken languages
    #[serde(rename = "Language", default)]
    pub language: String,
    /// Poster URL or `N/A`
    #[serde(rename = "Poster", default)]
    pub poster: String,
    /// External ratings
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    /// IMDb identifier
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    /// Always `"True"` for this type
    #[serde(rename = "Response")]
    pub response: String,
    /// Remaining provider fields (`Released`, `Awards`, ...), passed through
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MovieDetails {
    /// IMDb / Rotten Tomatoes ratings and their consensus verdict.
    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from_ratings(&self.ratings)
    }

    /// Poster URL unless the provider has none.
    pub fn poster_url(&self) -> Option<&str> {
        movie::poster_url(&self.poster)
    }
}

/// Negative answer body, shared by the provider and Kundo's own API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"False"`
    #[serde(rename = "Response")]
    pub response: String,
    /// Human readable reason
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorResponse {
    /// Builds a negative body with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            response: RESPONSE_FALSE.to_string(),
            error: error.into(),
        }
    }
}

impl From<&MovieSearchError> for ErrorResponse {
    fn from(error: &MovieSearchError) -> Self {
        Self::new(error.user_message())
    }
}
