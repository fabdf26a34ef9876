use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Story, Subreddit};
use crate::reddit_client::RedditApi;
use crate::state::{paginate, reduce, Action, AppState};

/// Result of one background fetch, sent back to the UI thread.
pub enum FetchOutcome {
    Subreddits(Result<Vec<Subreddit>>),
    Stories {
        generation: u64,
        subreddit_url: String,
        result: Result<Vec<Story>>,
    },
}

/// Owns the reader's state and the fetches that feed it.
///
/// Each fetch runs on its own worker thread and reports back through a single channel that
/// [`Controller::poll`] drains on the UI thread. Stories requests are tagged with a generation
/// number; only the response for the most recent selection is applied, older ones are dropped
/// when they arrive. The worker is reaped either way.
pub struct Controller {
    state: AppState,
    api: Arc<dyn RedditApi>,
    page_size: usize,
    stories_generation: u64,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    workers: Vec<thread::JoinHandle<()>>,
    in_flight: usize,
    mounted: bool,
    last_error: Option<String>,
}

impl Controller {
    pub fn new(api: Arc<dyn RedditApi>, page_size: usize) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: AppState::default(),
            api,
            page_size: page_size.max(1),
            stories_generation: 0,
            sender,
            receiver,
            workers: Vec::new(),
            in_flight: 0,
            mounted: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    fn dispatch(&mut self, action: Action) {
        debug!(action = action.kind(), "dispatch");
        self.state = reduce(&self.state, action);
    }

    fn spawn_fetch<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn RedditApi) -> FetchOutcome + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        let handle = thread::spawn(move || {
            // The receiver only goes away with the controller, nothing left to report to then
            let _ = tx.send(job(api.as_ref()));
        });

        self.workers.push(handle);
        self.in_flight += 1;
    }

    /// Starts the subreddit-list fetch. Only the first call does anything.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.refresh_subreddits();
    }

    pub fn refresh_subreddits(&mut self) {
        info!("loading subreddit list");
        self.last_error = None;
        self.spawn_fetch(|api| FetchOutcome::Subreddits(api.fetch_subreddits()));
    }

    /// Selects `subreddit`, clearing the visible stories, and fetches its top stories.
    /// Any stories request still in flight becomes stale.
    pub fn select_subreddit(&mut self, subreddit: Subreddit) {
        self.stories_generation += 1;
        let generation = self.stories_generation;
        let subreddit_url = subreddit.url().to_string();

        info!(subreddit = subreddit.display_name(), generation, "loading stories");
        // The status line describes the latest request only
        self.last_error = None;
        self.dispatch(Action::SetSelectedSubreddit(subreddit));

        self.spawn_fetch(move |api| {
            let result = api.fetch_top_stories(&subreddit_url);
            FetchOutcome::Stories {
                generation,
                subreddit_url,
                result,
            }
        });
    }

    /// Jumps to `page`. Callers only ask for pages that exist.
    pub fn set_page(&mut self, page: usize) {
        self.dispatch(Action::SetStoryPage(page));
    }

    pub fn next_page(&mut self) {
        if self.state.can_go_next() {
            self.set_page(self.state.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.state.can_go_previous() {
            self.set_page(self.state.current_page - 1);
        }
    }

    /// Applies every fetch result that has arrived. Returns true if anything was received.
    pub fn poll(&mut self) -> bool {
        let mut received = false;
        while let Ok(outcome) = self.receiver.try_recv() {
            self.handle_outcome(outcome);
            received = true;
        }
        self.reap_workers();
        received
    }

    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Subreddits(Ok(subreddits)) => {
                info!(count = subreddits.len(), "subreddit list loaded");
                self.dispatch(Action::SetNavigationItems(subreddits));
            }
            FetchOutcome::Subreddits(Err(e)) => {
                warn!(error = %e, "failed to load subreddit list");
                self.last_error = Some(format!("Could not load subreddits: {}", e));
            }
            FetchOutcome::Stories {
                generation,
                subreddit_url,
                result,
            } => {
                if generation != self.stories_generation {
                    debug!(
                        %subreddit_url,
                        generation,
                        latest = self.stories_generation,
                        "discarding stale stories response"
                    );
                } else {
                    match result {
                        Ok(stories) => self.apply_stories(&subreddit_url, stories),
                        Err(e) => {
                            warn!(%subreddit_url, error = %e, "failed to load stories");
                            self.last_error = Some(format!("Could not load stories: {}", e));
                        }
                    }
                }
            }
        }

        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn apply_stories(&mut self, subreddit_url: &str, stories: Vec<Story>) {
        let pages = paginate(&stories, self.page_size);
        info!(subreddit_url, stories = stories.len(), pages = pages.len(), "stories loaded");

        for (page, items) in pages {
            self.dispatch(Action::SetStoryItems { page, items });
        }
    }

    fn reap_workers(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) =
            self.workers.drain(..).partition(|handle| handle.is_finished());
        self.workers = running;

        for handle in finished {
            if handle.join().is_err() {
                // A panicked worker never sends its outcome
                warn!("fetch worker panicked");
                self.in_flight = self.in_flight.saturating_sub(1);
                self.last_error = Some("A background request failed unexpectedly".to_string());
            }
        }
    }
}
