//! Kundo Search - Movie search and details

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Wraps the OMDb movie database behind a provider trait, adds the input
//! validation that must happen before any network call, and folds provider
//! failures into the error taxonomy the web layer and the search page use.

pub mod errors;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::{Lookup, MovieSearchError};
pub use providers::{DemoProvider, MovieProvider, OmdbProvider};
pub use service::MovieSearchService;
pub use types::{ErrorResponse, MovieDetails, SearchResponse};

/// Convenience type alias for Results with MovieSearchError.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
