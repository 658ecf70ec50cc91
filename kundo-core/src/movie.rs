//! Movie domain types shared by the search controller, the provider layer
//! and the web surface.
//!
//! Field names on the wire follow the provider's casing so provider bodies
//! can be proxied without reshaping.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rating source label used by the provider for IMDb scores (`"8.5/10"`).
pub const IMDB_SOURCE: &str = "Internet Movie Database";

/// Rating source label used by the provider for Rotten Tomatoes scores (`"85%"`).
pub const ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";

/// Placeholder the provider uses for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One externally sourced rating. Neither field is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Rating {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

/// One entry of a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    /// Provider fields Kundo does not read (`Type`, ...), passed through as is
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MovieSummary {
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        imdb_id: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            imdb_id: imdb_id.into(),
            poster: poster.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Poster URL, or `None` when the card should show the fallback artwork.
    pub fn poster_url(&self) -> Option<&str> {
        poster_url(&self.poster)
    }

    /// Route of the detail page for this movie.
    pub fn detail_href(&self) -> String {
        format!("/movie/{}", urlencoding::encode(&self.imdb_id))
    }
}

/// Filters out the provider's empty and `"N/A"` poster values.
pub fn poster_url(poster: &str) -> Option<&str> {
    let poster = poster.trim();
    if poster.is_empty() || poster == NOT_AVAILABLE {
        None
    } else {
        Some(poster)
    }
}

/// Removes repeated identifiers, keeping the first occurrence of each and
/// the original order.
pub fn dedupe_by_id(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies
        .into_iter()
        .filter(|movie| seen.insert(movie.imdb_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> MovieSummary {
        MovieSummary::new(title, "1982", id, NOT_AVAILABLE)
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let movies = vec![
            movie("tt1", "First"),
            movie("tt2", "Second"),
            movie("tt1", "First again"),
            movie("tt3", "Third"),
            movie("tt2", "Second again"),
        ];

        let unique = dedupe_by_id(movies);

        let titles: Vec<&str> = unique.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_poster_fallback_values() {
        assert_eq!(poster_url("N/A"), None);
        assert_eq!(poster_url("  "), None);
        assert_eq!(
            poster_url("https://example.com/poster.jpg"),
            Some("https://example.com/poster.jpg")
        );
        assert_eq!(movie("tt0083658", "Blade Runner").poster_url(), None);
    }

    #[test]
    fn test_unknown_provider_fields_survive_a_round_trip() {
        let body = serde_json::json!({
            "Title": "Alien",
            "Year": "1979",
            "imdbID": "tt0078748",
            "Type": "movie",
            "Poster": "N/A"
        });
        let parsed: MovieSummary = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(parsed.extra["Type"], "movie");
        assert_eq!(serde_json::to_value(&parsed).unwrap(), body);
    }

    #[test]
    fn test_provider_casing_on_the_wire() {
        let json = r#"{"Title":"Blade Runner","Year":"1982","imdbID":"tt0083658","Poster":"https://example.com/p.jpg"}"#;
        let parsed: MovieSummary = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.imdb_id, "tt0083658");
        assert_eq!(parsed.detail_href(), "/movie/tt0083658");
        assert!(parsed.extra.is_empty());

        let rating: Rating =
            serde_json::from_str(r#"{"Source":"Rotten Tomatoes","Value":"90%"}"#).unwrap();
        assert_eq!(rating, Rating::new(ROTTEN_TOMATOES_SOURCE, "90%"));
    }
}
