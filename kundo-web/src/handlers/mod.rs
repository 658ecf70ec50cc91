//! HTTP request handlers organized by functionality

pub mod api;
pub mod htmx;
pub mod pages;

// Re-export handler functions
pub use api::{SearchParams, api_movie_details, api_search};
pub use htmx::{HX_REPLACE_URL, resolve_search, results_fragment, search_results};
pub use pages::{movie_page, not_found_page, render_page, search_page};
