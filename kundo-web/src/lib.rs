//! Kundo Web - HTMX pages and JSON API

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered search and detail pages with HTMX partial updates,
//! plus a small JSON API that proxies the movie provider.

pub mod components;
pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, build_router, run_server};
