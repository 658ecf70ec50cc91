//! Offline catalog for development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use kundo_core::movie::{MovieSummary, Rating};
use kundo_core::movie::{IMDB_SOURCE, NOT_AVAILABLE, ROTTEN_TOMATOES_SOURCE};
use kundo_core::search::pagination::PAGE_SIZE;

use super::MovieProvider;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetails, RESPONSE_TRUE, SearchResponse};

struct DemoMovie {
    imdb_id: &'static str,
    title: &'static str,
    year: &'static str,
    rated: &'static str,
    runtime: &'static str,
    genre: &'static str,
    director: &'static str,
    actors: &'static str,
    plot: &'static str,
    imdb_rating: Option<&'static str>,
    tomatometer: Option<&'static str>,
}

const CATALOG: &[DemoMovie] = &[
    DemoMovie {
        imdb_id: "tt0083658",
        title: "Blade Runner",
        year: "1982",
        rated: "R",
        runtime: "117 min",
        genre: "Action, Drama, Sci-Fi",
        director: "Ridley Scott",
        actors: "Harrison Ford, Rutger Hauer, Sean Young",
        plot: "A blade runner must pursue and terminate four replicants who stole a ship in space and have returned to Earth to find their creator.",
        imdb_rating: Some("8.1/10"),
        tomatometer: Some("89%"),
    },
    DemoMovie {
        imdb_id: "tt1856101",
        title: "Blade Runner 2049",
        year: "2017",
        rated: "R",
        runtime: "164 min",
        genre: "Action, Drama, Mystery",
        director: "Denis Villeneuve",
        actors: "Harrison Ford, Ryan Gosling, Ana de Armas",
        plot: "Young Blade Runner K's discovery of a long-buried secret leads him to track down former Blade Runner Rick Deckard.",
        imdb_rating: Some("8.0/10"),
        tomatometer: Some("88%"),
    },
    DemoMovie {
        imdb_id: "tt0078748",
        title: "Alien",
        year: "1979",
        rated: "R",
        runtime: "117 min",
        genre: "Horror, Sci-Fi",
        director: "Ridley Scott",
        actors: "Sigourney Weaver, Tom Skerritt, John Hurt",
        plot: "The crew of a commercial spacecraft encounters a deadly lifeform after investigating an unknown transmission.",
        imdb_rating: Some("8.5/10"),
        tomatometer: Some("93%"),
    },
    DemoMovie {
        imdb_id: "tt0090605",
        title: "Aliens",
        year: "1986",
        rated: "R",
        runtime: "137 min",
        genre: "Action, Adventure, Sci-Fi",
        director: "James Cameron",
        actors: "Sigourney Weaver, Michael Biehn, Carrie Henn",
        plot: "Decades after surviving the Nostromo incident, Ellen Ripley is sent out to re-establish contact with a terraforming colony.",
        imdb_rating: Some("8.4/10"),
        tomatometer: Some("97%"),
    },
    DemoMovie {
        imdb_id: "tt0103644",
        title: "Alien 3",
        year: "1992",
        rated: "R",
        runtime: "114 min",
        genre: "Action, Horror, Sci-Fi",
        director: "David Fincher",
        actors: "Sigourney Weaver, Charles S. Dutton, Charles Dance",
        plot: "Ellen Ripley crash-lands on a prison planet after her escape pod is jettisoned from the Sulaco.",
        imdb_rating: Some("6.4/10"),
        tomatometer: Some("44%"),
    },
    DemoMovie {
        imdb_id: "tt0118583",
        title: "Alien Resurrection",
        year: "1997",
        rated: "R",
        runtime: "109 min",
        genre: "Action, Horror, Sci-Fi",
        director: "Jean-Pierre Jeunet",
        actors: "Sigourney Weaver, Winona Ryder, Dominique Pinon",
        plot: "Two hundred years after her death, Ellen Ripley is revived as a powerful human-alien hybrid clone.",
        imdb_rating: Some("6.3/10"),
        tomatometer: Some("54%"),
    },
    DemoMovie {
        imdb_id: "tt1446714",
        title: "Prometheus",
        year: "2012",
        rated: "R",
        runtime: "124 min",
        genre: "Adventure, Mystery, Sci-Fi",
        director: "Ridley Scott",
        actors: "Noomi Rapace, Logan Marshall-Green, Michael Fassbender",
        plot: "Following clues to the origin of mankind, a team finds a structure on a distant moon.",
        imdb_rating: Some("7.0/10"),
        tomatometer: Some("73%"),
    },
    DemoMovie {
        imdb_id: "tt0816692",
        title: "Interstellar",
        year: "2014",
        rated: "PG-13",
        runtime: "169 min",
        genre: "Adventure, Drama, Sci-Fi",
        director: "Christopher Nolan",
        actors: "Matthew McConaughey, Anne Hathaway, Jessica Chastain",
        plot: "When Earth becomes uninhabitable in the future, a farmer leads a team of researchers through a wormhole.",
        imdb_rating: Some("8.7/10"),
        tomatometer: Some("73%"),
    },
    DemoMovie {
        imdb_id: "tt1160419",
        title: "Dune",
        year: "2021",
        rated: "PG-13",
        runtime: "155 min",
        genre: "Action, Adventure, Drama",
        director: "Denis Villeneuve",
        actors: "Timothee Chalamet, Rebecca Ferguson, Zendaya",
        plot: "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset.",
        imdb_rating: Some("8.0/10"),
        tomatometer: Some("83%"),
    },
    DemoMovie {
        imdb_id: "tt0087182",
        title: "Dune",
        year: "1984",
        rated: "PG-13",
        runtime: "137 min",
        genre: "Action, Adventure, Sci-Fi",
        director: "David Lynch",
        actors: "Kyle MacLachlan, Virginia Madsen, Francesca Annis",
        plot: "A Duke's son leads desert warriors against the galactic emperor and his father's evil nemesis.",
        imdb_rating: Some("6.3/10"),
        tomatometer: Some("36%"),
    },
    DemoMovie {
        imdb_id: "tt15239678",
        title: "Dune: Part Two",
        year: "2024",
        rated: "PG-13",
        runtime: "166 min",
        genre: "Action, Adventure, Drama",
        director: "Denis Villeneuve",
        actors: "Timothee Chalamet, Zendaya, Rebecca Ferguson",
        plot: "Paul Atreides unites with the Fremen while on a warpath of revenge against the conspirators who destroyed his family.",
        imdb_rating: Some("8.5/10"),
        tomatometer: None,
    },
    DemoMovie {
        imdb_id: "tt0120201",
        title: "Starship Troopers",
        year: "1997",
        rated: "R",
        runtime: "129 min",
        genre: "Action, Adventure, Sci-Fi",
        director: "Paul Verhoeven",
        actors: "Casper Van Dien, Denise Richards, Dina Meyer",
        plot: "Humans in a fascist, militaristic future wage war with giant alien bugs.",
        imdb_rating: Some("7.3/10"),
        tomatometer: Some("60%"),
    },
    DemoMovie {
        imdb_id: "tt0118884",
        title: "Contact",
        year: "1997",
        rated: "PG",
        runtime: "150 min",
        genre: "Drama, Mystery, Sci-Fi",
        director: "Robert Zemeckis",
        actors: "Jodie Foster, Matthew McConaughey, Tom Skerritt",
        plot: "Dr. Ellie Arroway finds conclusive radio proof of extraterrestrial intelligence.",
        imdb_rating: None,
        tomatometer: None,
    },
];

impl DemoMovie {
    fn summary(&self) -> MovieSummary {
        MovieSummary::new(self.title, self.year, self.imdb_id, NOT_AVAILABLE)
    }

    fn details(&self) -> MovieDetails {
        let ratings = [
            (IMDB_SOURCE, self.imdb_rating),
            (ROTTEN_TOMATOES_SOURCE, self.tomatometer),
        ]
        .into_iter()
        .filter_map(|(source, value)| value.map(|value| Rating::new(source, value)))
        .collect();

        MovieDetails {
            title: self.title.to_string(),
            year: self.year.to_string(),
            rated: self.rated.to_string(),
            runtime: self.runtime.to_string(),
            genre: self.genre.to_string(),
            director: self.director.to_string(),
            writer: NOT_AVAILABLE.to_string(),
            actors: self.actors.to_string(),
            plot: self.plot.to_string(),
            language: "English".to_string(),
            poster: NOT_AVAILABLE.to_string(),
            ratings,
            imdb_id: self.imdb_id.to_string(),
            response: RESPONSE_TRUE.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Provider that answers from a small built-in catalog.
///
/// Title matching is a case-insensitive substring test. Pages hold ten
/// entries, like the OMDb API.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates a new demo provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MovieProvider for DemoProvider {
    async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, MovieSearchError> {
        let needle = query.trim().to_lowercase();
        let matches: Vec<&DemoMovie> = CATALOG
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect();

        let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE) as usize;
        let results: Vec<MovieSummary> = matches
            .iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .map(|movie| movie.summary())
            .collect();

        if results.is_empty() {
            return Err(MovieSearchError::NotFound {
                message: "Movie not found!".to_string(),
            });
        }

        Ok(SearchResponse::new(results, matches.len() as u32))
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, MovieSearchError> {
        CATALOG
            .iter()
            .find(|movie| movie.imdb_id == imdb_id.trim())
            .map(DemoMovie::details)
            .ok_or_else(|| MovieSearchError::NotFound {
                message: "Incorrect IMDb ID.".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use kundo_core::rating::ConsensusVerdict;

    use super::*;

    #[tokio::test]
    async fn test_title_search_is_case_insensitive() {
        let response = DemoProvider.search("blade runner", 1).await.unwrap();

        assert_eq!(response.total_results(), 2);
        assert_eq!(response.search[0].imdb_id, "tt0083658");
        assert_eq!(response.search[0].year, "1982");
    }

    #[tokio::test]
    async fn test_pages_hold_ten_entries() {
        let first = DemoProvider.search("e", 1).await.unwrap();
        let second = DemoProvider.search("e", 2).await.unwrap();

        assert_eq!(first.search.len(), 10);
        assert_eq!(first.total_results(), second.total_results());
        assert!(!second.search.is_empty());
        assert!(DemoProvider.search("e", 3).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_title_is_not_found() {
        let error = DemoProvider.search("qwertyuiop", 1).await.unwrap_err();
        assert_eq!(error.user_message(), "Movie not found!");
    }

    #[tokio::test]
    async fn test_details_carry_ratings() {
        let details = DemoProvider.details("tt0083658").await.unwrap();
        assert_eq!(details.rating_summary().verdict, ConsensusVerdict::Positive);

        let details = DemoProvider.details("tt0103644").await.unwrap();
        assert_eq!(details.rating_summary().verdict, ConsensusVerdict::Negative);

        let details = DemoProvider.details("tt0118884").await.unwrap();
        assert!(!details.rating_summary().has_any());

        let error = DemoProvider.details("tt0000000").await.unwrap_err();
        assert_eq!(error.user_message(), "Incorrect IMDb ID.");
    }
}
