//! The incremental content loader behind the blog section.
//!
//! [`FeedController`] owns the pagination cursor and the four-state
//! [`Phase`] machine.  Fetches run on a spawned tokio task; their outcome
//! comes back over a per-fetch oneshot channel and is applied by
//! [`poll_completed`] (UI tick) or [`settle`] (headless loop, tests).  A task
//! that dies without answering (a panicking source) moves the feed to
//! `Error`, so the page can be retried.  Only one fetch is ever in flight:
//! `request_more()` while `Loading` or `Exhausted` is a no-op, so an eager
//! trigger cannot cause duplicate requests.
//!
//! [`poll_completed`]: FeedController::poll_completed
//! [`settle`]: FeedController::settle

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, error, info, warn};

use super::render::Renderer;
use super::state::{FeedConfig, FeedState, Phase};
use crate::error::{FeedError, FeedResult};
use crate::source::{PageSource, Post};

/// Notice shown in place of the posts when a page fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load posts. Please try again later.";

/// Detail recorded when a fetch task ends without sending its result.
const LOST_FETCH: &str = "fetch task ended without a result";

/// The fetch currently in flight.
#[derive(Debug)]
struct InFlight {
    page: usize,
    outcome: oneshot::Receiver<FeedResult<Vec<Post>>>,
}

pub struct FeedController<S, R>
where
    S: PageSource + 'static,
    R: Renderer,
{
    source: Arc<S>,
    renderer: R,
    state: FeedState,
    skeleton_count: usize,
    /// Ids rendered so far, to reject a page that repeats one.
    seen: HashSet<u64>,
    fetches_issued: usize,
    last_error: Option<String>,
    /// Present exactly while the phase is `Loading`.
    in_flight: Option<InFlight>,
}

impl<S, R> FeedController<S, R>
where
    S: PageSource + 'static,
    R: Renderer,
{
    /// Build a controller.  Fails fast on an invalid configuration.
    ///
    /// With `auto_start` the first page is requested before returning, which
    /// spawns onto the current tokio runtime.
    pub fn new(source: Arc<S>, renderer: R, config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;

        let mut controller = Self {
            source,
            renderer,
            state: FeedState::new(config.page_size),
            skeleton_count: config.skeleton_count,
            seen: HashSet::new(),
            fetches_issued: 0,
            last_error: None,
            in_flight: None,
        };

        if config.auto_start {
            controller.request_more();
        }
        Ok(controller)
    }

    /// Ask for the next page.  Returns whether a fetch was actually issued.
    pub fn request_more(&mut self) -> bool {
        match self.state.phase {
            Phase::Loading | Phase::Exhausted => {
                debug!(phase = %self.state.phase, "request_more ignored");
                return false;
            }
            Phase::Error => {
                self.renderer.clear_error();
                self.last_error = None;
                debug!(page = self.state.cursor, "retrying failed page");
            }
            Phase::Idle => {}
        }

        self.begin_fetch();
        true
    }

    fn begin_fetch(&mut self) {
        let page = self.state.cursor;
        let page_size = self.state.page_size;

        self.state.phase = Phase::Loading;
        self.fetches_issued += 1;
        self.renderer.render_skeletons(self.skeleton_count);
        debug!(page, page_size, source = self.source.name(), "fetch issued");

        let source = Arc::clone(&self.source);
        let (tx, outcome) = oneshot::channel();
        // If the fetch panics, `tx` is dropped unsent and the receiver
        // reports the task as lost.
        tokio::spawn(async move {
            let result = source.fetch(page, page_size).await;
            let _ = tx.send(result);
        });
        self.in_flight = Some(InFlight { page, outcome });
    }

    /// Apply a finished fetch if one is ready.  Never blocks.
    pub fn poll_completed(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return false;
        };
        let result = match in_flight.outcome.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(FeedError::Contract(LOST_FETCH.to_string())),
        };
        self.complete(result);
        true
    }

    /// Wait for the in-flight fetch and apply it.
    ///
    /// Returns `false` immediately when nothing is loading.
    pub async fn settle(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return false;
        };
        let result = (&mut in_flight.outcome)
            .await
            .unwrap_or_else(|_| Err(FeedError::Contract(LOST_FETCH.to_string())));
        self.complete(result);
        true
    }

    fn complete(&mut self, result: FeedResult<Vec<Post>>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        debug_assert_eq!(in_flight.page, self.state.cursor);
        debug!(page = in_flight.page, "fetch finished");

        self.renderer.clear_skeletons();

        let checked = result.and_then(|posts| self.check_page(&posts).map(|()| posts));

        match checked {
            Ok(posts) => self.accept_page(posts),
            Err(e) => self.fail(e),
        }
    }

    fn accept_page(&mut self, posts: Vec<Post>) {
        let page = self.state.cursor;
        if !posts.is_empty() {
            self.renderer.render_posts(&posts);
            self.seen.extend(posts.iter().map(|p| p.id));
        }

        let next = self.state.apply_page(posts.len());
        info!(
            page,
            received = posts.len(),
            loaded = self.state.loaded_count,
            "page loaded"
        );

        if next == Phase::Exhausted {
            self.renderer.hide_load_more();
            info!(loaded = self.state.loaded_count, "feed exhausted");
        }
    }

    fn fail(&mut self, err: FeedError) {
        if err.is_transport() {
            warn!(page = self.state.cursor, error = %err, "page failed to load");
        } else {
            error!(page = self.state.cursor, error = %err, "page rejected");
        }
        self.state.phase = Phase::Error;
        self.last_error = Some(err.to_string());
        self.renderer.render_error(LOAD_ERROR_MESSAGE);
    }

    /// Enforce the page source contract before anything reaches the renderer.
    fn check_page(&self, posts: &[Post]) -> FeedResult<()> {
        if posts.len() > self.state.page_size {
            return Err(FeedError::Contract(format!(
                "page {} returned {} posts, more than the page size {}",
                self.state.cursor,
                posts.len(),
                self.state.page_size
            )));
        }

        let mut ids = HashSet::with_capacity(posts.len());
        for post in posts {
            if let Some(defect) = post.defect() {
                return Err(FeedError::Contract(defect));
            }
            if self.seen.contains(&post.id) || !ids.insert(post.id) {
                return Err(FeedError::Contract(format!("duplicate post id {}", post.id)));
            }
        }
        Ok(())
    }

    // -- accessors -----------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetches started over the controller's lifetime, retries included.
    pub fn fetches_issued(&self) -> usize {
        self.fetches_issued
    }

    /// Detail of the most recent failure, cleared on retry.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
