//! Search state snapshot and its reducer.

use std::time::Duration;

use crate::movie::{MovieSummary, dedupe_by_id};
use crate::search::address::AddressState;
use crate::search::pagination::Pagination;

/// Default quiet period before a typed query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Result of one provider fetch as the search page sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found {
        results: Vec<MovieSummary>,
        total_results: u32,
    },
    /// Negative provider answer, bad status or transport failure.
    Failed { message: String },
}

/// One request the driver must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number; only the latest one may settle into state
    pub seq: u64,
    pub query: String,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query field changed (every keystroke).
    QueryEdited(String),
    /// A debounce timer fired.
    DebounceElapsed { token: u64 },
    /// The reader picked a page.
    PageRequested(u32),
    /// One page forward from wherever the state is when this is applied.
    NextPageRequested,
    PreviousPageRequested,
    /// A fetch finished.
    FetchSettled { seq: u64, outcome: FetchOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    /// Start a timer and send back `DebounceElapsed { token }`, replacing
    /// any timer still pending.
    ScheduleDebounce { token: u64, delay: Duration },
    Fetch(SearchRequest),
    /// Replace the current address without adding a history entry.
    ReplaceAddress(AddressState),
}

/// Everything the search page knows about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Text currently in the query field
    pub query: String,
    /// Last committed query; drives fetching
    pub debounced_query: String,
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_results: u32,
    pub loading: bool,
    pub error: Option<String>,
    debounce: Duration,
    debounce_token: u64,
    request_seq: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            debounced_query: String::new(),
            page: 1,
            results: Vec::new(),
            total_results: 0,
            loading: false,
            error: None,
            debounce,
            debounce_token: 0,
            request_seq: 0,
        }
    }

    /// Restores a session from its address, committing the query right away.
    ///
    /// Returns the effects needed to load that address.
    pub fn restore(address: &AddressState, debounce: Duration) -> (Self, Vec<SearchEffect>) {
        let mut state = Self::new(debounce);
        state.query = address.query.clone();
        state.debounced_query = address.query.clone();
        state.page = address.page.max(1);
        let effects = state.settle();
        (state, effects)
    }

    pub fn address(&self) -> AddressState {
        AddressState::new(self.debounced_query.clone(), self.page)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_results)
    }

    /// Whether the committed query counts as empty.
    pub fn is_idle(&self) -> bool {
        self.debounced_query.trim().is_empty()
    }

    /// Sequence number of the newest issued fetch.
    pub fn latest_request(&self) -> u64 {
        self.request_seq
    }

    /// What the page should display for this state.
    pub fn view(&self) -> SearchView<'_> {
        if self.loading {
            SearchView::Loading
        } else if let Some(message) = &self.error {
            SearchView::Failed(message)
        } else if self.is_idle() {
            SearchView::Idle
        } else if self.results.is_empty() {
            SearchView::NoMatches {
                query: &self.debounced_query,
            }
        } else {
            SearchView::Results {
                movies: &self.results,
                total: self.total_results,
                pagination: self.pagination(),
            }
        }
    }

    /// Reacts to a change of the `(debounced_query, page)` pair.
    fn settle(&mut self) -> Vec<SearchEffect> {
        // Any fetch still in flight is now stale.
        self.request_seq += 1;

        if self.is_idle() {
            self.results.clear();
            self.total_results = 0;
            self.error = None;
            self.loading = false;
            return vec![SearchEffect::ReplaceAddress(self.address())];
        }

        self.loading = true;
        self.error = None;
        vec![
            SearchEffect::Fetch(SearchRequest {
                seq: self.request_seq,
                query: self.debounced_query.clone(),
                page: self.page,
            }),
            SearchEffect::ReplaceAddress(self.address()),
        ]
    }

    fn commit_query(&mut self) -> Vec<SearchEffect> {
        if self.query == self.debounced_query {
            return Vec::new();
        }
        self.debounced_query = self.query.clone();
        self.page = 1;
        self.results.clear();
        self.total_results = 0;
        self.settle()
    }

    /// Moves to `page` when the current result set offers it.
    ///
    /// With no known total (a fresh query still loading, a failure) there
    /// are no pages to pick, so every request is dropped.
    fn change_page(&mut self, page: u32) -> Vec<SearchEffect> {
        if page == self.page || self.is_idle() || !self.pagination().contains(page) {
            return Vec::new();
        }
        self.page = page;
        self.settle()
    }

    fn apply_outcome(&mut self, seq: u64, outcome: FetchOutcome) -> Vec<SearchEffect> {
        if seq != self.request_seq {
            tracing::debug!(seq, latest = self.request_seq, "Discarding stale search response");
            return Vec::new();
        }
        self.loading = false;
        match outcome {
            FetchOutcome::Found {
                results,
                total_results,
            } => {
                self.results = dedupe_by_id(results);
                self.total_results = total_results;
                self.error = None;
            }
            FetchOutcome::Failed { message } => {
                self.results.clear();
                self.total_results = 0;
                self.error = Some(message);
            }
        }
        Vec::new()
    }
}

/// Applies one event to the state and returns the effects it asks for.
pub fn reduce(state: &mut SearchState, event: SearchEvent) -> Vec<SearchEffect> {
    match event {
        SearchEvent::QueryEdited(query) => {
            state.query = query;
            state.debounce_token += 1;
            vec![SearchEffect::ScheduleDebounce {
                token: state.debounce_token,
                delay: state.debounce,
            }]
        }
        SearchEvent::DebounceElapsed { token } => {
            if token != state.debounce_token {
                return Vec::new();
            }
            state.commit_query()
        }
        SearchEvent::PageRequested(page) => state.change_page(page),
        SearchEvent::NextPageRequested => match state.pagination().next() {
            Some(page) => state.change_page(page),
            None => Vec::new(),
        },
        SearchEvent::PreviousPageRequested => match state.pagination().previous() {
            Some(page) => state.change_page(page),
            None => Vec::new(),
        },
        SearchEvent::FetchSettled { seq, outcome } => state.apply_outcome(seq, outcome),
    }
}

/// Rendering-oriented projection of [`SearchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView<'a> {
    /// Nothing typed yet: prompt the reader
    Idle,
    Loading,
    Failed(&'a str),
    NoMatches {
        query: &'a str,
    },
    Results {
        movies: &'a [MovieSummary],
        total: u32,
        pagination: Pagination,
    },
}

/// `Found 1 result` / `Found 12 results`.
pub fn results_label(total: u32) -> String {
    let plural = if total == 1 { "" } else { "s" };
    format!("Found {total} result{plural}")
}
