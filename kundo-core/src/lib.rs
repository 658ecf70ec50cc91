//! Kundo Core - Rating consensus and search state
//!
//! This crate holds the decision logic of Kundo: the movie domain types,
//! the consensus verdict derived from two external ratings, and the search
//! state controller that drives the search page. It also owns the shared
//! configuration, runtime mode and tracing setup.

pub mod config;
pub mod mode;
pub mod movie;
pub mod rating;
pub mod search;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::KundoConfig;
pub use mode::RuntimeMode;
pub use movie::{MovieSummary, Rating, dedupe_by_id};
pub use rating::{ConsensusVerdict, ParsedScore, RatingSummary, derive_consensus};
pub use search::{
    AddressState, Pagination, SearchController, SearchEffect, SearchEvent, SearchSource,
    SearchState, SearchView,
};

/// Errors that can bubble up from Kundo startup and wiring.
///
/// Search and rating failures never surface here: they degrade into
/// view state instead.
#[derive(Debug, thiserror::Error)]
pub enum KundoError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {reason}")]
    Server { reason: String },
}

impl KundoError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            KundoError::Configuration { reason } => format!("Configuration error: {reason}"),
            KundoError::Io(_) => "File system error occurred".to_string(),
            KundoError::Server { .. } => "Server error occurred".to_string(),
        }
    }

    /// Checks if this error is caused by how Kundo was configured.
    pub fn is_user_error(&self) -> bool {
        matches!(self, KundoError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, KundoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_user_errors() {
        let error = KundoError::Configuration {
            reason: "OMDB_API_KEY is not set".to_string(),
        };
        assert!(error.is_user_error());
        assert!(error.user_message().contains("OMDB_API_KEY"));

        let io = KundoError::from(std::io::Error::other("disk"));
        assert!(!io.is_user_error());
        assert_eq!(io.user_message(), "File system error occurred");
    }
}
