//! Layout components - headers, cards, search input

use super::html_escape;

/// Renders the page header with the app name linking home.
pub fn page_header() -> String {
    r#"<header class="flex items-center justify-between mb-8">
            <a href="/" class="text-3xl font-bold text-kundo-500 hover:text-kundo-400">KundOMDb</a>
        </header>"#
        .to_string()
}

/// Renders a card container.
pub fn card(content: &str) -> String {
    format!(
        r#"<div class="bg-gray-800 border border-gray-700 rounded-lg p-6 mb-6">
            {content}
        </div>"#
    )
}

/// Renders the live search field.
///
/// HTMX issues `GET /htmx/search?q=..` once typing has paused for the
/// given number of milliseconds and swaps the answer into `#results`.
pub fn search_input(query: &str, debounce_ms: u128) -> String {
    format!(
        r##"<input type="search" name="q" value="{}" placeholder="Search for movies..."
            autocomplete="off" autofocus
            class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-kundo-500"
            hx-get="/htmx/search"
            hx-trigger="input changed delay:{debounce_ms}ms, search"
            hx-target="#results"
            hx-indicator="#search-indicator"
            hx-sync="this:replace">
        <div id="search-indicator" class="htmx-indicator text-sm text-gray-400 mt-2">Searching...</div>"##,
        html_escape(query)
    )
}

/// Renders a centered status line (idle prompt, no matches, errors).
pub fn status_message(message: &str, is_error: bool) -> String {
    let color = if is_error {
        "text-red-400"
    } else {
        "text-gray-400"
    };
    format!(
        r#"<div class="text-center py-12"><p class="{color}">{}</p></div>"#,
        html_escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_input_keeps_query_and_delay() {
        let html = search_input(r#"say "hi""#, 300);
        assert!(html.contains(r#"value="say &quot;hi&quot;""#));
        assert!(html.contains("delay:300ms"));
        assert!(html.contains(r#"placeholder="Search for movies...""#));
    }

    #[test]
    fn test_error_status_is_red() {
        assert!(status_message("Movie not found!", true).contains("text-red-400"));
        assert!(!status_message("Start typing", false).contains("text-red-400"));
    }
}
