//! Movie components - poster, result cards, detail view

use kundo_core::{MovieSummary, dedupe_by_id};
use kundo_search::MovieDetails;

use super::html_escape;
use super::rating::rating_badges;

fn poster_placeholder(classes: &str, hidden: bool) -> String {
    let display = if hidden { "flex hidden" } else { "flex" };
    format!(
        r#"<div class="{classes} {display} items-center justify-center bg-gray-700 text-gray-500 text-4xl" role="img" aria-label="No poster available">🎬</div>"#
    )
}

/// Poster image, or a neutral placeholder when the provider has none.
///
/// An image that fails to load hides itself and reveals the same
/// placeholder.
pub fn poster(url: Option<&str>, title: &str, classes: &str) -> String {
    match url {
        Some(url) => format!(
            r#"<img src="{}" alt="{} poster" loading="lazy" class="{classes} object-cover" onerror="this.classList.add('hidden');this.nextElementSibling.classList.remove('hidden');">{}"#,
            html_escape(url),
            html_escape(title),
            poster_placeholder(classes, true)
        ),
        None => poster_placeholder(classes, false),
    }
}

/// One search result linking to its detail page.
pub fn movie_card(movie: &MovieSummary) -> String {
    format!(
        r#"<a href="{href}" class="block bg-gray-800 border border-gray-700 rounded-lg overflow-hidden hover:border-kundo-500 transition-colors">
            {poster}
            <div class="p-4">
                <h3 class="font-semibold text-white truncate">{title}</h3>
                <p class="text-sm text-gray-400">{year}</p>
            </div>
        </a>"#,
        href = html_escape(&movie.detail_href()),
        poster = poster(movie.poster_url(), &movie.title, "w-full aspect-[2/3]"),
        title = html_escape(&movie.title),
        year = html_escape(&movie.year),
    )
}

/// Responsive grid of result cards; repeated ids are shown once.
pub fn movie_grid(movies: &[MovieSummary]) -> String {
    let cards: String = dedupe_by_id(movies.to_vec())
        .iter()
        .map(movie_card)
        .collect();
    format!(
        r#"<div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-5 gap-6">{cards}</div>"#
    )
}

fn fact(label: &str, value: &str) -> String {
    if value.trim().is_empty() || value == kundo_core::movie::NOT_AVAILABLE {
        return String::new();
    }
    format!(
        r#"<div><dt class="text-sm text-gray-400">{label}</dt><dd class="text-white">{}</dd></div>"#,
        html_escape(value)
    )
}

/// Full detail view for one movie.
pub fn movie_detail(details: &MovieDetails) -> String {
    let subtitle: Vec<&str> = [&details.year, &details.rated, &details.runtime]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.trim().is_empty() && *part != kundo_core::movie::NOT_AVAILABLE)
        .collect();

    let facts: String = [
        ("Genre", &details.genre),
        ("Director", &details.director),
        ("Writer", &details.writer),
        ("Actors", &details.actors),
        ("Language", &details.language),
    ]
    .into_iter()
    .map(|(label, value)| fact(label, value))
    .collect();

    format!(
        r#"<article class="flex flex-col md:flex-row gap-8">
            <div class="md:w-1/3 flex-shrink-0">{poster}</div>
            <div class="flex-1 space-y-6">
                <div>
                    <h1 class="text-4xl font-bold text-white">{title}</h1>
                    <p class="text-gray-400 mt-2">{subtitle}</p>
                </div>
                {ratings}
                <p class="text-gray-200 leading-relaxed">{plot}</p>
                <dl class="grid grid-cols-1 sm:grid-cols-2 gap-4">{facts}</dl>
            </div>
        </article>"#,
        poster = poster(details.poster_url(), &details.title, "w-full rounded-lg aspect-[2/3]"),
        title = html_escape(&details.title),
        subtitle = html_escape(&subtitle.join(" · ")),
        ratings = rating_badges(&details.rating_summary()),
        plot = html_escape(&details.plot),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, poster: &str) -> MovieSummary {
        MovieSummary::new(title, "1982", id, poster)
    }

    #[test]
    fn test_card_links_to_detail_page() {
        let html = movie_card(&movie(
            "tt0083658",
            "Blade Runner",
            "https://example.com/poster.jpg",
        ));
        assert!(html.contains(r#"href="/movie/tt0083658""#));
        assert!(html.contains(r#"src="https://example.com/poster.jpg""#));
        assert!(html.contains("1982"));
    }

    #[test]
    fn test_broken_poster_falls_back_to_placeholder() {
        let html = poster(Some("https://example.com/gone.jpg"), "Alien", "w-full");

        assert!(html.contains(
            "onerror=\"this.classList.add('hidden');this.nextElementSibling.classList.remove('hidden');\""
        ));
        assert!(html.contains(r#"class="w-full flex hidden items-center"#));
        let img = html.find("<img").unwrap();
        let placeholder = html.find("No poster available").unwrap();
        assert!(img < placeholder);
    }

    #[test]
    fn test_missing_poster_uses_placeholder() {
        let html = movie_card(&movie("tt1", "Nothing", "N/A"));
        assert!(!html.contains("<img"));
        assert!(html.contains("No poster available"));
    }

    #[test]
    fn test_grid_drops_repeated_ids() {
        let html = movie_grid(&[
            movie("tt1", "First", "N/A"),
            movie("tt1", "First again", "N/A"),
            movie("tt2", "Second", "N/A"),
        ]);
        assert_eq!(html.matches("<a href").count(), 2);
        assert!(!html.contains("First again"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let html = movie_card(&movie("tt1", "<script>alert(1)</script>", "N/A"));
        assert!(!html.contains("<script>"));
    }
}
