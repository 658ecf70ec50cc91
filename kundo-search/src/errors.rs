//! Error types for movie search functionality.

use thiserror::Error;

/// Which provider call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Title search
    Search,
    /// Details by IMDb id
    Details,
}

impl Lookup {
    /// Generic message shown when the provider could not be reached.
    pub fn failure_message(self) -> &'static str {
        match self {
            Lookup::Search => "Failed to fetch search results",
            Lookup::Details => "Failed to fetch movie details",
        }
    }
}

/// Errors that can occur during movie search operations.
#[derive(Debug, Error)]
pub enum MovieSearchError {
    /// The search query was empty after trimming.
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// The movie id was empty after trimming.
    #[error("IMDB ID cannot be empty")]
    EmptyId,

    /// The provider answered but reported no match.
    #[error("{message}")]
    NotFound {
        /// The provider's own explanation
        message: String,
    },

    /// The provider could not be reached or answered with a non-success status.
    #[error("Network error during {lookup:?}: {reason}")]
    Transport {
        /// The call that failed
        lookup: Lookup,
        /// The reason for the failure
        reason: String,
    },

    /// The provider answered with a body that could not be understood.
    #[error("Invalid response during {lookup:?}: {reason}")]
    InvalidResponse {
        /// The call that failed
        lookup: Lookup,
        /// The reason for the parse failure
        reason: String,
    },
}

impl MovieSearchError {
    /// Message safe to show to the reader.
    ///
    /// Transport and parse details are replaced by a generic line; provider
    /// messages are passed through.
    pub fn user_message(&self) -> String {
        match self {
            MovieSearchError::EmptyQuery | MovieSearchError::EmptyId => self.to_string(),
            MovieSearchError::NotFound { message } => message.clone(),
            MovieSearchError::Transport { lookup, .. }
            | MovieSearchError::InvalidResponse { lookup, .. } => {
                lookup.failure_message().to_string()
            }
        }
    }

    /// Checks if this error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, MovieSearchError::EmptyQuery | MovieSearchError::EmptyId)
    }
}
