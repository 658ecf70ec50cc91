//! HTMX + Tailwind web server for Kundo
//!
//! Serves the search and detail pages, their HTMX fragments and the JSON
//! API. Panics inside a handler become a JSON 500 instead of a dropped
//! connection.

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use kundo_core::{KundoConfig, KundoError, RuntimeMode};
use kundo_search::{ErrorResponse, MovieSearchService};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::handlers::{
    api_movie_details, api_search, movie_page, not_found_page, search_page, search_results,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Movie lookups
    pub search_service: MovieSearchService,
    /// Settings the pages read (debounce delay)
    pub config: Arc<KundoConfig>,
}

impl AppState {
    /// Creates state around a search service and its configuration.
    pub fn new(search_service: MovieSearchService, config: KundoConfig) -> Self {
        Self {
            search_service,
            config: Arc::new(config),
        }
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        // Pages
        .route("/", get(search_page))
        .route("/movie/{id}", get(movie_page))
        // HTMX partial update endpoints
        .route("/htmx/search", get(search_results))
        // JSON API endpoints
        .route("/api/movies/search", get(api_search))
        .route("/api/movies/{id}", get(api_movie_details))
        .fallback(not_found_page)
        .with_state(state);

    with_layers(app)
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

/// Runs the server until Ctrl-C.
///
/// # Errors
///
/// - `KundoError::Configuration` - Provider cannot be set up for `mode`
/// - `KundoError::Server` - Listener could not bind
/// - `KundoError::Io` - Server failed while running
pub async fn run_server(config: KundoConfig, mode: RuntimeMode) -> kundo_core::Result<()> {
    let search_service = MovieSearchService::from_config(&config, mode)?;
    let address = config.server.bind_address();
    let state = AppState::new(search_service, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| KundoError::Server {
            reason: format!("Cannot bind {address}: {e}"),
        })?;
    info!(%address, %mode, "Kundo movie search running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {e}");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
