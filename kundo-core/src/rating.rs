//! Consensus verdict derived from two independently sourced ratings.
//!
//! Rating A is the IMDb ten-point score (`"8.5/10"`), rating B the Rotten
//! Tomatoes percentage (`"85%"`). Both must parse and both must clear their
//! threshold for a positive verdict. Nothing here fails: absent or malformed
//! input yields [`ConsensusVerdict::Undetermined`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::movie::{IMDB_SOURCE, ROTTEN_TOMATOES_SOURCE, Rating};

/// Minimum ten-point score for a positive verdict (inclusive).
pub const TEN_POINT_THRESHOLD: f64 = 7.0;

/// Minimum percentage for a positive verdict (inclusive).
pub const PERCENTAGE_THRESHOLD: f64 = 70.0;

static TEN_POINT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)/10$").expect("valid ten-point pattern"));

static PERCENTAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)%$").expect("valid percentage pattern"));

/// Outcome of validating one provider-formatted rating value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedScore {
    /// The provider did not supply this rating.
    Missing,
    /// The value does not match its pattern or is not a finite number.
    Invalid,
    Valid(f64),
}

/// Thumbs-up, thumbs-down or no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConsensusVerdict {
    Positive,
    Negative,
    Undetermined,
}

impl ConsensusVerdict {
    /// Whether a consensus badge should be rendered at all.
    pub fn is_determined(self) -> bool {
        !matches!(self, ConsensusVerdict::Undetermined)
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsensusVerdict::Positive => "thumbs up",
            ConsensusVerdict::Negative => "thumbs down",
            ConsensusVerdict::Undetermined => "no consensus",
        }
    }
}

/// Parses `<digits>[.<digits>]/10`, anchored on both ends.
pub fn parse_ten_point(value: &str) -> ParsedScore {
    parse_with(&TEN_POINT_PATTERN, value)
}

/// Parses `<digits>%`, anchored on both ends.
pub fn parse_percentage(value: &str) -> ParsedScore {
    parse_with(&PERCENTAGE_PATTERN, value)
}

fn parse_with(pattern: &Regex, value: &str) -> ParsedScore {
    let Some(number) = pattern.captures(value).and_then(|caps| caps.get(1)) else {
        return ParsedScore::Invalid;
    };
    match number.as_str().parse::<f64>() {
        Ok(score) if score.is_finite() => ParsedScore::Valid(score),
        _ => ParsedScore::Invalid,
    }
}

/// Combines two already parsed scores with the two-threshold AND gate.
pub fn consensus_from_scores(ten_point: ParsedScore, percentage: ParsedScore) -> ConsensusVerdict {
    match (ten_point, percentage) {
        (ParsedScore::Valid(a), ParsedScore::Valid(b)) => {
            if a >= TEN_POINT_THRESHOLD && b >= PERCENTAGE_THRESHOLD {
                ConsensusVerdict::Positive
            } else {
                ConsensusVerdict::Negative
            }
        }
        _ => ConsensusVerdict::Undetermined,
    }
}

/// Derives the verdict for a ten-point rating and a percentage rating.
///
/// Only the `value` of each rating is inspected; callers choose which
/// source goes in which slot.
pub fn derive_consensus(
    ten_point: Option<&Rating>,
    percentage: Option<&Rating>,
) -> ConsensusVerdict {
    let a = ten_point.map_or(ParsedScore::Missing, |r| parse_ten_point(&r.value));
    let b = percentage.map_or(ParsedScore::Missing, |r| parse_percentage(&r.value));
    consensus_from_scores(a, b)
}

/// The two ratings Kundo displays, picked out of a provider rating list,
/// together with their verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub imdb: Option<Rating>,
    pub rotten_tomatoes: Option<Rating>,
    pub verdict: ConsensusVerdict,
}

impl RatingSummary {
    /// Picks the first IMDb and first Rotten Tomatoes entry; other
    /// sources are ignored.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let imdb = ratings.iter().find(|r| r.source == IMDB_SOURCE).cloned();
        let rotten_tomatoes = ratings
            .iter()
            .find(|r| r.source == ROTTEN_TOMATOES_SOURCE)
            .cloned();
        let verdict = derive_consensus(imdb.as_ref(), rotten_tomatoes.as_ref());

        Self {
            imdb,
            rotten_tomatoes,
            verdict,
        }
    }

    /// False when there is nothing to show in the rating row.
    pub fn has_any(&self) -> bool {
        self.imdb.is_some() || self.rotten_tomatoes.is_some()
    }
}
