//! HTMX handlers for live search updates
//!
//! The search field and the page links request `/htmx/search`; the answer
//! is the results region only, plus an `HX-Replace-Url` header so the
//! browser address follows the search without adding history entries.

use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use kundo_core::search::{
    AddressState, IDLE_PROMPT, SearchEffect, SearchEvent, SearchState, SearchView, reduce,
    results_label,
};
use kundo_core::SearchSource;
use kundo_search::MovieSearchService;

use super::api::SearchParams;
use crate::components::{html_escape, movie_grid, pagination_nav, status_message};
use crate::server::AppState;

/// Header telling HTMX to replace the current address.
pub const HX_REPLACE_URL: &str = "hx-replace-url";

/// Loads `address` through the search reducer in one pass.
///
/// The debounce step is skipped: the address already holds a committed
/// query, exactly as when a shared link is opened.
pub async fn resolve_search(service: &MovieSearchService, address: &AddressState) -> SearchState {
    let (mut state, effects) = SearchState::restore(address, std::time::Duration::ZERO);
    for effect in effects {
        if let SearchEffect::Fetch(request) = effect {
            let outcome = service.fetch_page(&request.query, request.page).await;
            reduce(
                &mut state,
                SearchEvent::FetchSettled {
                    seq: request.seq,
                    outcome,
                },
            );
        }
    }
    state
}

/// Renders the results region for a settled search state.
pub fn results_fragment(state: &SearchState) -> String {
    match state.view() {
        SearchView::Idle => status_message(IDLE_PROMPT, false),
        SearchView::Loading => status_message("Searching...", false),
        SearchView::Failed(message) => status_message(message, true),
        SearchView::NoMatches { query } => {
            status_message(&format!("No movies found for \"{query}\""), false)
        }
        SearchView::Results {
            movies,
            total,
            pagination,
        } => format!(
            r#"<p class="text-sm text-gray-400 mb-4">{}</p>
            {}
            {}"#,
            html_escape(&results_label(total)),
            movie_grid(movies),
            pagination_nav(&state.address(), &pagination)
        ),
    }
}

/// `GET /htmx/search?q=<text>&page=<n>`
pub async fn search_results(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let address = AddressState::from_params(params.q.as_deref(), params.page.as_deref());
    let search = resolve_search(&state.search_service, &address).await;

    let mut response = Html(results_fragment(&search)).into_response();
    if let Ok(href) = HeaderValue::from_str(&search.address().to_href()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(HX_REPLACE_URL), href);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_address_stays_idle() {
        let service = MovieSearchService::demo();
        let state = resolve_search(&service, &AddressState::new("   ", 1)).await;

        assert!(results_fragment(&state).contains(IDLE_PROMPT));
    }

    #[tokio::test]
    async fn test_results_carry_count_and_links() {
        let service = MovieSearchService::demo();
        let state = resolve_search(&service, &AddressState::new("Blade Runner", 1)).await;
        let html = results_fragment(&state);

        assert!(html.contains("Found 2 results"));
        assert!(html.contains(r#"href="/movie/tt0083658""#));
        assert!(html.contains(r#"href="/movie/tt1856101""#));
        assert!(!html.contains("Pagination"));
    }

    #[tokio::test]
    async fn test_provider_message_is_shown() {
        let service = MovieSearchService::demo();
        let state = resolve_search(&service, &AddressState::new("qwertyuiop", 1)).await;

        assert!(results_fragment(&state).contains("Movie not found!"));
    }
}
