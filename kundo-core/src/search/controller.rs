//! Tokio driver for the search reducer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::search::address::AddressState;
use crate::search::state::{
    FetchOutcome, SearchEffect, SearchEvent, SearchRequest, SearchState, reduce,
};

/// Where the controller gets result pages from.
///
/// Implementations never fail: every error is folded into
/// [`FetchOutcome::Failed`] with a message fit for display.
#[async_trait]
pub trait SearchSource: Send + Sync + 'static {
    async fn fetch_page(&self, query: &str, page: u32) -> FetchOutcome;
}

/// Handle to a running search session.
///
/// Dropping the handle (or calling [`SearchController::shutdown`]) ends the
/// session; pending timers are cancelled and late responses are ignored.
#[derive(Debug)]
pub struct SearchController {
    commands: mpsc::UnboundedSender<SearchEvent>,
    state: watch::Receiver<SearchState>,
    address: watch::Receiver<AddressState>,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Starts an empty session.
    pub fn spawn<S: SearchSource>(source: Arc<S>, debounce: Duration) -> Self {
        Self::restore(source, AddressState::default(), debounce)
    }

    /// Starts a session from a shared address, loading it immediately.
    pub fn restore<S: SearchSource>(
        source: Arc<S>,
        address: AddressState,
        debounce: Duration,
    ) -> Self {
        let (state, effects) = SearchState::restore(&address, debounce);
        let (state_tx, state_rx) = watch::channel(state.clone());
        let (address_tx, address_rx) = watch::channel(address);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let driver = Driver {
            source,
            state,
            state_tx,
            address_tx,
            internal: mpsc::unbounded_channel(),
            debounce_timer: None,
        };
        let task = tokio::spawn(driver.run(commands_rx, effects));

        Self {
            commands: commands_tx,
            state: state_rx,
            address: address_rx,
            task,
        }
    }

    /// Reports the full current text of the query field.
    pub fn edit_query(&self, query: impl Into<String>) {
        self.send(SearchEvent::QueryEdited(query.into()));
    }

    /// Asks for a page; ignored when out of range.
    pub fn request_page(&self, page: u32) {
        self.send(SearchEvent::PageRequested(page));
    }

    /// Steps one page forward, counting from any page change still queued.
    pub fn next_page(&self) {
        self.send(SearchEvent::NextPageRequested);
    }

    pub fn previous_page(&self) {
        self.send(SearchEvent::PreviousPageRequested);
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Receiver that observes every address replacement.
    pub fn address(&self) -> watch::Receiver<AddressState> {
        self.address.clone()
    }

    /// Ends the session and waits for the driver to stop.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            debug!("Search driver ended abnormally: {e}");
        }
    }

    fn send(&self, event: SearchEvent) {
        if self.commands.send(event).is_err() {
            debug!("Search driver is gone; dropping event");
        }
    }
}

struct Driver<S> {
    source: Arc<S>,
    state: SearchState,
    state_tx: watch::Sender<SearchState>,
    address_tx: watch::Sender<AddressState>,
    internal: (
        mpsc::UnboundedSender<SearchEvent>,
        mpsc::UnboundedReceiver<SearchEvent>,
    ),
    debounce_timer: Option<JoinHandle<()>>,
}

impl<S: SearchSource> Driver<S> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SearchEvent>,
        initial: Vec<SearchEffect>,
    ) {
        self.perform(initial);

        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = self.internal.1.recv() => event,
            };
            trace!(?event, "Search event");

            let effects = reduce(&mut self.state, event);
            self.state_tx.send_replace(self.state.clone());
            self.perform(effects);
        }

        if let Some(timer) = self.debounce_timer.take() {
            timer.abort();
        }
    }

    fn perform(&mut self, effects: Vec<SearchEffect>) {
        for effect in effects {
            match effect {
                SearchEffect::ScheduleDebounce { token, delay } => {
                    if let Some(previous) = self.debounce_timer.take() {
                        previous.abort();
                    }
                    let events = self.internal.0.clone();
                    self.debounce_timer = Some(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = events.send(SearchEvent::DebounceElapsed { token });
                    }));
                }
                SearchEffect::Fetch(request) => self.spawn_fetch(request),
                SearchEffect::ReplaceAddress(address) => {
                    self.address_tx.send_replace(address);
                }
            }
        }
    }

    fn spawn_fetch(&self, request: SearchRequest) {
        let source = Arc::clone(&self.source);
        let events = self.internal.0.clone();
        debug!(query = %request.query, page = request.page, seq = request.seq, "Searching");
        tokio::spawn(async move {
            let outcome = source.fetch_page(&request.query, request.page).await;
            let _ = events.send(SearchEvent::FetchSettled {
                seq: request.seq,
                outcome,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::movie::MovieSummary;
    use crate::search::state::SearchView;

    /// Records every request; "slow" queries take a second to answer.
    #[derive(Default)]
    struct RecordingSource {
        requests: Mutex<Vec<(String, u32)>>,
    }

    impl RecordingSource {
        fn requests(&self) -> Vec<(String, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchSource for RecordingSource {
        async fn fetch_page(&self, query: &str, page: u32) -> FetchOutcome {
            self.requests.lock().unwrap().push((query.to_string(), page));
            let delay = if query.starts_with("slow") { 1000 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if query == "nothing" {
                return FetchOutcome::Failed {
                    message: "Movie not found!".to_string(),
                };
            }
            FetchOutcome::Found {
                results: vec![MovieSummary::new(
                    format!("{query} p{page}"),
                    "2001",
                    format!("tt-{query}-{page}"),
                    "N/A",
                )],
                total_results: 35,
            }
        }
    }

    async fn settled(controller: &SearchController, query: &str) -> SearchState {
        let mut rx = controller.subscribe();
        rx.wait_for(|s| s.debounced_query == query && !s.loading)
            .await
            .unwrap()
            .clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_issues_one_request() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        for query in ["t", "te", "tes", "test"] {
            controller.edit_query(query);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let state = settled(&controller, "test").await;

        assert_eq!(source.requests(), vec![("test".to_string(), 1)]);
        assert_eq!(state.results[0].title, "test p1");
        assert_eq!(*controller.address().borrow(), AddressState::new("test", 1));
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_committed_before_the_quiet_period() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        controller.edit_query("alien");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(source.requests().is_empty());
        assert_eq!(controller.snapshot().query, "alien");
        assert_eq!(controller.snapshot().debounced_query, "");

        settled(&controller, "alien").await;
        assert_eq!(source.requests().len(), 1);
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_issues_no_request() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        controller.edit_query("  ");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(source.requests().is_empty());
        assert_eq!(controller.snapshot().view(), SearchView::Idle);
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_paging_and_query_reset() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        controller.edit_query("dune");
        settled(&controller, "dune").await;

        controller.next_page();
        let mut rx = controller.subscribe();
        rx.wait_for(|s| s.page == 2 && !s.loading).await.unwrap();
        assert_eq!(*controller.address().borrow(), AddressState::new("dune", 2));

        controller.edit_query("dune messiah");
        let state = settled(&controller, "dune messiah").await;
        assert_eq!(state.page, 1);
        assert_eq!(
            source.requests(),
            vec![
                ("dune".to_string(), 1),
                ("dune".to_string(), 2),
                ("dune messiah".to_string(), 1),
            ]
        );
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_next_pages_both_count() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        controller.edit_query("dune");
        settled(&controller, "dune").await;

        controller.next_page();
        controller.next_page();
        let mut rx = controller.subscribe();
        let state = rx.wait_for(|s| s.page == 3 && !s.loading).await.unwrap().clone();

        assert_eq!(state.results[0].title, "dune p3");
        assert_eq!(*controller.address().borrow(), AddressState::new("dune", 3));
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_does_not_overwrite() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::spawn(source.clone(), Duration::from_millis(300));

        controller.edit_query("slow");
        tokio::time::sleep(Duration::from_millis(350)).await;
        controller.edit_query("quick");
        settled(&controller, "quick").await;

        // Let the slow request finish too.
        tokio::time::sleep(Duration::from_secs(2)).await;
        let state = controller.snapshot();
        assert_eq!(state.results[0].title, "quick p1");
        assert_eq!(source.requests().len(), 2);
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_fetches_address_immediately() {
        let source = Arc::new(RecordingSource::default());
        let controller = SearchController::restore(
            source.clone(),
            AddressState::new("nothing", 2),
            Duration::from_millis(300),
        );

        let state = settled(&controller, "nothing").await;
        assert_eq!(source.requests(), vec![("nothing".to_string(), 2)]);
        assert_eq!(state.view(), SearchView::Failed("Movie not found!"));
        controller.shutdown().await;
    }
}
