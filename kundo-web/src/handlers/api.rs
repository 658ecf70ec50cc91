//! JSON API handlers proxying the movie provider

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use kundo_search::{ErrorResponse, MovieSearchError};
use serde::Deserialize;

use crate::server::AppState;

/// Raw `q` / `page` query parameters shared by the API and the pages.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search text
    pub q: Option<String>,
    /// 1-based page number, kept raw so bad input can be reported
    pub page: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn lookup_failure(error: &MovieSearchError) -> Response {
    let status = if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(ErrorResponse::from(error))).into_response()
}

/// Reads the leading integer of `page`: `"2abc"` is 2 and `"1.5"` is 1.
///
/// Absent or blank means 1. `None` when there are no leading digits or the
/// number is below 1.
fn parse_page(raw: Option<&str>) -> Option<u32> {
    let Some(page) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Some(1);
    };
    let (negative, unsigned) = match page.as_bytes().first() {
        Some(b'-') => (true, &page[1..]),
        Some(b'+') => (false, &page[1..]),
        _ => (false, page),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned[..digits_end].parse::<u32>().ok()?;
    (!negative && value >= 1).then_some(value)
}

/// `GET /api/movies/search?q=<text>&page=<n>`
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.q.as_deref().filter(|q| !q.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, r#"Query parameter "q" is required"#);
    };
    let Some(page) = parse_page(params.page.as_deref()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Page parameter must be a positive number",
        );
    };

    match state.search_service.search_movies(query, page).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => lookup_failure(&e),
    }
}

/// `GET /api/movies/{id}`
pub async fn api_movie_details(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Response {
    if imdb_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Movie ID is required");
    }

    match state.search_service.movie_details(&imdb_id).await {
        Ok(details) => Json(details).into_response(),
        Err(e) => lookup_failure(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), Some(1));
        assert_eq!(parse_page(Some("")), Some(1));
        assert_eq!(parse_page(Some(" 3 ")), Some(3));
        assert_eq!(parse_page(Some("0")), None);
        assert_eq!(parse_page(Some("-2")), None);
        assert_eq!(parse_page(Some("abc")), None);
        assert_eq!(parse_page(Some("-")), None);
        assert_eq!(parse_page(Some("+4")), Some(4));
        assert_eq!(parse_page(Some("-0")), None);
    }

    #[test]
    fn test_parse_page_takes_leading_digits() {
        assert_eq!(parse_page(Some("2abc")), Some(2));
        assert_eq!(parse_page(Some("1.5")), Some(1));
        assert_eq!(parse_page(Some("0.9")), None);
        assert_eq!(parse_page(Some("7 pages")), Some(7));
    }
}
