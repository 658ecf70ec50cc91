//! Integration tests for Kundo
//!
//! Exercise the provider, the search service, the search controller and
//! the router together against a fake OMDb.

#[path = "integration/api_routes.rs"]
mod api_routes;

#[path = "integration/pages.rs"]
mod pages;

#[path = "integration/search_flow.rs"]
mod search_flow;

#[path = "integration/style.rs"]
mod style;
