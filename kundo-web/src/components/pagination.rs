//! Page selector for search results

use kundo_core::search::{AddressState, Pagination};

const LINK_CLASSES: &str = "px-3 py-2 rounded-md text-sm font-medium transition-colors";

/// Link that loads `address` into `#results` and keeps a real `href` for
/// readers without JavaScript.
fn page_link(address: &AddressState, label: &str, extra_classes: &str) -> String {
    format!(
        r##"<a href="{}" hx-get="{}" hx-target="#results" class="{LINK_CLASSES} {extra_classes}">{label}</a>"##,
        address.to_href(),
        address.href_for("/htmx/search"),
    )
}

fn disabled(label: &str) -> String {
    format!(
        r#"<span aria-disabled="true" class="{LINK_CLASSES} text-gray-600 cursor-not-allowed">{label}</span>"#
    )
}

/// Renders Previous / page numbers / Next for `address`.
///
/// Empty when everything fits on one page.
pub fn pagination_nav(address: &AddressState, pagination: &Pagination) -> String {
    if !pagination.is_needed() {
        return String::new();
    }

    let previous = pagination.previous().map_or_else(
        || disabled("Previous"),
        |page| page_link(&address.with_page(page), "Previous", "text-gray-300 hover:bg-gray-700"),
    );
    let next = pagination.next().map_or_else(
        || disabled("Next"),
        |page| page_link(&address.with_page(page), "Next", "text-gray-300 hover:bg-gray-700"),
    );

    let numbers: String = pagination
        .window()
        .into_iter()
        .map(|page| {
            if page == pagination.current {
                format!(
                    r#"<span aria-current="page" class="{LINK_CLASSES} bg-kundo-500 text-white">{page}</span>"#
                )
            } else {
                page_link(
                    &address.with_page(page),
                    &page.to_string(),
                    "text-gray-300 hover:bg-gray-700",
                )
            }
        })
        .collect();

    format!(
        r#"<nav class="flex items-center justify-center gap-2 mt-8" aria-label="Pagination">{previous}{numbers}{next}</nav>"#
    )
}
