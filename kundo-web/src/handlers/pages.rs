//! Full page handlers
//!
//! Pages compose components into complete HTML documents sharing one
//! layout that loads HTMX and Tailwind.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use kundo_core::search::AddressState;

use super::api::SearchParams;
use super::htmx::{resolve_search, results_fragment};
use crate::components::{card, html_escape, movie_detail, page_header, search_input};
use crate::server::AppState;

/// Wraps `content` in the shared document layout.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{} - KundOMDb</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <script>
                tailwind.config = {{
                    theme: {{
                        extend: {{
                            colors: {{
                                'kundo': {{
                                    400: '#fbbf24',
                                    500: '#f59e0b',
                                    600: '#d97706'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <style>
                .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
                .htmx-request .htmx-indicator {{ opacity: 1; }}
                .htmx-request.htmx-indicator {{ opacity: 1; }}
            </style>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans">
            <main class="max-w-7xl mx-auto px-4 py-8">
                {}
                {}
            </main>
        </body>
        </html>"#,
        html_escape(title),
        page_header(),
        content
    ))
}

/// `GET /?q=<text>&page=<n>`
///
/// Opening a shared address renders its results straight away.
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let address = AddressState::from_params(params.q.as_deref(), params.page.as_deref());
    let search = resolve_search(&state.search_service, &address).await;

    let content = format!(
        r#"{}
        <div id="results">{}</div>"#,
        card(&search_input(
            &address.query,
            state.config.search.debounce.as_millis()
        )),
        results_fragment(&search)
    );

    render_page("Search", &content)
}

/// `GET /movie/{id}`
pub async fn movie_page(State(state): State<AppState>, Path(imdb_id): Path<String>) -> Response {
    match state.search_service.movie_details(&imdb_id).await {
        Ok(details) => {
            let content = format!(
                r#"<button type="button" onclick="history.back()" class="inline-flex items-center gap-2 px-4 py-2 mb-6 rounded-md text-sm font-medium text-gray-300 hover:bg-gray-700">← Back to Search</button>
                {}"#,
                movie_detail(&details)
            );
            render_page(&details.title, &content).into_response()
        }
        Err(e) => {
            tracing::debug!(imdb_id = %imdb_id, error = %e, "Detail page falls back to not found");
            not_found_page().await.into_response()
        }
    }
}

/// Not found page, also served for unknown routes.
pub async fn not_found_page() -> (StatusCode, Html<String>) {
    let content = r#"<div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold mb-4">404</h1>
                <h2 class="text-2xl font-semibold mb-2">Movie Not Found</h2>
                <p class="text-gray-400">The movie you're looking for doesn't exist or has been removed.</p>
            </div>
        </div>"#;
    (StatusCode::NOT_FOUND, render_page("Not Found", content))
}
