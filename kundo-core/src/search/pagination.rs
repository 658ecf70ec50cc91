//! Page arithmetic for search results.

/// Results per provider page.
pub const PAGE_SIZE: u32 = 10;

/// Maximum page numbers offered by the page selector.
pub const PAGE_WINDOW: u32 = 5;

/// Current page together with the number of pages the result set spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Pagination for `total_results` at the provider's page size.
    pub fn new(current: u32, total_results: u32) -> Self {
        Self {
            current: current.max(1),
            total_pages: total_pages(total_results, PAGE_SIZE),
        }
    }

    /// Whether any page controls should be shown.
    pub fn is_needed(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    /// Whether `page` can be selected.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Page numbers for the selector, at most [`PAGE_WINDOW`] of them.
    pub fn window(&self) -> Vec<u32> {
        self.window_of(PAGE_WINDOW)
    }

    /// Page numbers windowed around the current page.
    ///
    /// All pages when they fit; otherwise the first pages while the current
    /// page is near the start, the last pages near the end, and the current
    /// page centered in between.
    pub fn window_of(&self, size: u32) -> Vec<u32> {
        let size = size.max(1);
        let total = self.total_pages;
        if total <= size {
            return (1..=total).collect();
        }

        let half = size / 2;
        let first = if self.current <= half + 1 {
            1
        } else if self.current >= total.saturating_sub(half) {
            total - size + 1
        } else {
            self.current - half
        };
        (first..first + size).collect()
    }
}

/// `ceil(total_results / page_size)`.
pub fn total_pages(total_results: u32, page_size: u32) -> u32 {
    total_results.div_ceil(page_size.max(1))
}
