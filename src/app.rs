//! Application state for the portfolio page.
//!
//! `App` owns the feed controller, the page collaborators (theme, typing
//! animation, carousel), and the navigation focus.  Rendering lives in
//! `ui.rs`; key handling in `input.rs`.

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::carousel::{default_projects, Carousel};
use crate::feed::{FeedController, FeedView, Phase, VisibilityTrigger};
use crate::source::DynSource;
use crate::theme::ThemeManager;
use crate::typing::Typewriter;

pub type Feed = FeedController<DynSource, FeedView>;

/// Page sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Projects,
    Blog,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::About, Section::Projects, Section::Blog];

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Blog => "Blog",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct App {
    pub feed: Feed,
    pub trigger: VisibilityTrigger,
    /// Selection in the blog list (rows plus sentinel).
    pub list_state: ListState,
    /// Set by the renderer after each frame.
    pub sentinel_visible: bool,
    pub theme: ThemeManager,
    pub typewriter: Typewriter,
    pub carousel: Carousel,
    /// Focused section, highlighted in the navigation bar.
    pub section: Section,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Transient message shown in the status bar.
    pub status: Option<String>,
}

impl App {
    pub fn new(
        feed: Feed,
        theme: ThemeManager,
        autoplay: Option<Duration>,
        now: Instant,
    ) -> Self {
        Self {
            feed,
            trigger: VisibilityTrigger::new(),
            list_state: ListState::default(),
            sentinel_visible: false,
            theme,
            typewriter: Typewriter::new(now),
            carousel: Carousel::new(default_projects(), autoplay, now),
            section: Section::About,
            quit: false,
            status: None,
        }
    }

    /// Advance timers and apply any finished fetch.
    pub fn tick(&mut self, now: Instant) {
        if self.feed.poll_completed() {
            self.clamp_selection();
        }
        self.typewriter.update(now);
        self.carousel.tick(now);
    }

    /// Feed the sentinel visibility measured by the last frame to the trigger.
    pub fn observe_sentinel(&mut self) {
        if self.trigger.observe(self.sentinel_visible) {
            tracing::debug!("sentinel entered viewport");
            self.feed.request_more();
        }
    }

    /// Explicit "load more" (also retries after an error).
    pub fn load_more(&mut self) {
        self.status = None;
        if !self.feed.request_more() {
            tracing::debug!(phase = %self.feed.phase(), "load more ignored");
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::warn!(error = %e, "could not save theme preference");
                self.status = Some(format!("Theme not saved: {e}"));
            }
        }
    }

    /// One-line summary of the feed for the status bar.
    pub fn feed_status(&self) -> String {
        let state = self.feed.state();
        match state.phase {
            Phase::Idle => format!("{} posts", state.loaded_count),
            Phase::Loading => format!("Loading page {}…", state.cursor),
            Phase::Error => format!(
                "Error: {} (m: retry)",
                self.feed.last_error().unwrap_or("unknown")
            ),
            Phase::Exhausted => format!("All {} posts loaded", state.loaded_count),
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn focus(&mut self, section: Section) {
        self.section = section;
    }

    pub fn focus_next(&mut self) {
        self.section = self.section.next();
    }

    pub fn focus_previous(&mut self) {
        self.section = self.section.previous();
    }

    /// Scroll within the focused section.
    pub fn scroll_down(&mut self, now: Instant) {
        match self.section {
            Section::About => {}
            Section::Projects => self.carousel.next(now),
            Section::Blog => self.select_next(),
        }
    }

    pub fn scroll_up(&mut self, now: Instant) {
        match self.section {
            Section::About => {}
            Section::Projects => self.carousel.previous(now),
            Section::Blog => self.select_previous(),
        }
    }

    fn list_len(&self) -> usize {
        self.feed.renderer().display_len()
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.list_len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.list_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Rows can disappear (skeletons, sentinel); keep the selection in range.
    fn clamp_selection(&mut self) {
        let len = self.list_len();
        if let Some(i) = self.list_state.selected() {
            self.list_state
                .select(if len == 0 { None } else { Some(i.min(len - 1)) });
        }
    }
}
