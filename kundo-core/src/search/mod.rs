//! Search state controller
//!
//! The search page is driven by a plain state struct and a pure reducer
//! ([`state::reduce`]). Side effects (debounce timers, provider fetches,
//! address replacement) come back out of the reducer as
//! [`SearchEffect`] values; [`SearchController`] is the tokio driver that
//! performs them and feeds their outcome back in as events.

pub mod address;
pub mod controller;
pub mod pagination;
pub mod state;

pub use address::AddressState;
pub use controller::{SearchController, SearchSource};
pub use pagination::{PAGE_SIZE, PAGE_WINDOW, Pagination};
pub use state::{
    FetchOutcome, SearchEffect, SearchEvent, SearchRequest, SearchState, SearchView, reduce,
    results_label,
};

/// Message shown when a fetch fails without a more specific explanation.
pub const GENERIC_SEARCH_ERROR: &str = "Failed to search movies";

/// Prompt shown while the query field is empty.
pub const IDLE_PROMPT: &str = "Start typing to search for movies";
