//! Feed configuration and the controller-owned pagination state.

use std::fmt;

use crate::error::{FeedError, FeedResult};

/// Where the controller is in its fetch cycle.
///
/// `Exhausted` is absorbing: once entered, no further fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
    Exhausted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Error => "error",
            Phase::Exhausted => "exhausted",
        };
        f.write_str(label)
    }
}

/// Options recognised when constructing a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Posts requested per page.  Must be positive.
    pub page_size: usize,
    /// Issue the first request from the constructor.
    pub auto_start: bool,
    /// Placeholder rows shown while a page is loading.
    pub skeleton_count: usize,
}

impl FeedConfig {
    pub const DEFAULT_PAGE_SIZE: usize = 6;
    pub const DEFAULT_SKELETONS: usize = 3;

    pub fn validate(&self) -> FeedResult<()> {
        if self.page_size == 0 {
            return Err(FeedError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            auto_start: true,
            skeleton_count: Self::DEFAULT_SKELETONS,
        }
    }
}

/// Pagination state, mutated only by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// Next page to fetch; starts at 1.
    pub cursor: usize,
    /// Fixed at construction.
    pub page_size: usize,
    pub phase: Phase,
    /// Posts rendered so far.
    pub loaded_count: usize,
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            cursor: 1,
            page_size,
            phase: Phase::Idle,
            loaded_count: 0,
        }
    }

    /// Record a successful page of `n` posts and return the next phase.
    ///
    /// A page shorter than `page_size` is the end of the data.  An empty page
    /// leaves the cursor where it is.
    pub fn apply_page(&mut self, n: usize) -> Phase {
        if n > 0 {
            self.cursor += 1;
            self.loaded_count += n;
        }
        self.phase = if n < self.page_size {
            Phase::Exhausted
        } else {
            Phase::Idle
        };
        self.phase
    }
}
