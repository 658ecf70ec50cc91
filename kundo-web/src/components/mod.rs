//! Reusable HTML components for the HTMX + Tailwind UI
//!
//! Components return HTML fragments as strings so the same markup serves
//! full pages and HTMX partial swaps. Every piece of provider text goes
//! through [`html_escape`] before it lands in markup.

pub mod layout;
pub mod movie;
pub mod pagination;
pub mod rating;

// Re-export main component functions
pub use layout::{card, page_header, search_input, status_message};
pub use movie::{movie_card, movie_detail, movie_grid, poster};
pub use pagination::pagination_nav;
pub use rating::{consensus_badge, imdb_badge, rating_badges, rotten_tomatoes_badge};

/// Escapes text for use inside HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(html_escape("Blade Runner"), "Blade Runner");
    }
}
