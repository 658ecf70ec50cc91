//! Rating badges - IMDb, Rotten Tomatoes and the Kundo consensus

use kundo_core::rating::{ConsensusVerdict, RatingSummary};
use kundo_core::Rating;

use super::html_escape;

fn badge(classes: &str, label: &str, value: &str) -> String {
    format!(
        r#"<span class="inline-flex items-center gap-1 px-2 py-1 rounded text-xs font-semibold {classes}"><span>{label}</span><span>{}</span></span>"#,
        html_escape(value)
    )
}

/// Amber IMDb badge showing the raw provider value.
pub fn imdb_badge(rating: &Rating) -> String {
    badge("bg-amber-500 text-black", "IMDb", &rating.value)
}

/// Red Rotten Tomatoes badge showing the raw provider value.
pub fn rotten_tomatoes_badge(rating: &Rating) -> String {
    badge("bg-red-600 text-white", "RT", &rating.value)
}

/// Kundo badge: green thumbs up, red thumbs down, nothing when undetermined.
pub fn consensus_badge(verdict: ConsensusVerdict) -> String {
    let (classes, icon) = match verdict {
        ConsensusVerdict::Positive => ("bg-green-600 text-white", "👍"),
        ConsensusVerdict::Negative => ("bg-red-700 text-white", "👎"),
        ConsensusVerdict::Undetermined => return String::new(),
    };
    format!(
        r#"<span class="inline-flex items-center gap-1 px-2 py-1 rounded text-xs font-semibold {classes}" title="{}"><span>Kundo</span><span>{icon}</span></span>"#,
        verdict.label()
    )
}

/// Row of all badges a movie has; empty when it has no known ratings.
pub fn rating_badges(summary: &RatingSummary) -> String {
    if !summary.has_any() {
        return String::new();
    }

    let badges: Vec<String> = [
        summary.imdb.as_ref().map(imdb_badge),
        summary.rotten_tomatoes.as_ref().map(rotten_tomatoes_badge),
        Some(consensus_badge(summary.verdict)).filter(|b| !b.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect();

    format!(
        r#"<div class="flex flex-wrap items-center gap-2">{}</div>"#,
        badges.join("")
    )
}

#[cfg(test)]
mod tests {
    use kundo_core::movie::{IMDB_SOURCE, ROTTEN_TOMATOES_SOURCE};

    use super::*;

    fn summary(ratings: &[(&str, &str)]) -> RatingSummary {
        let ratings: Vec<Rating> = ratings
            .iter()
            .map(|(source, value)| Rating::new(*source, *value))
            .collect();
        RatingSummary::from_ratings(&ratings)
    }

    #[test]
    fn test_both_ratings_and_positive_consensus() {
        let html = rating_badges(&summary(&[
            (IMDB_SOURCE, "8.1/10"),
            (ROTTEN_TOMATOES_SOURCE, "89%"),
        ]));

        assert!(html.contains("8.1/10"));
        assert!(html.contains("89%"));
        assert!(html.contains("Kundo"));
        assert!(html.contains("bg-green-600"));
    }

    #[test]
    fn test_negative_consensus_is_red() {
        let html = rating_badges(&summary(&[
            (IMDB_SOURCE, "6.4/10"),
            (ROTTEN_TOMATOES_SOURCE, "44%"),
        ]));
        assert!(html.contains("bg-red-700"));
        assert!(html.contains("thumbs down"));
    }

    #[test]
    fn test_undetermined_hides_kundo_badge() {
        let html = rating_badges(&summary(&[(IMDB_SOURCE, "8.5/10")]));
        assert!(html.contains("IMDb"));
        assert!(!html.contains("Kundo"));

        let html = rating_badges(&summary(&[
            (IMDB_SOURCE, "N/A"),
            (ROTTEN_TOMATOES_SOURCE, "90%"),
        ]));
        assert!(!html.contains("Kundo"));
    }

    #[test]
    fn test_no_ratings_renders_nothing() {
        assert_eq!(rating_badges(&summary(&[("Metacritic", "80/100")])), "");
    }
}
