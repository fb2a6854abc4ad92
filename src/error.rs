//! Error types shared by the feed controller and its page sources.
//!
//! Everything a [`PageSource`](crate::source::PageSource) can fail with is a
//! transport failure: the controller recovers from it by entering the
//! `Error` phase and showing a notice.  The remaining variants are
//! precondition or contract violations and are reported as such.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    // Transport failures
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed post data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("feed parsing failed: {0}")]
    Feed(#[from] rss::Error),

    // Precondition violations
    #[error("invalid page size {0}: must be a positive integer")]
    InvalidPageSize(usize),

    #[error("unknown page source {0:?}: expected `sample` or an http(s) URL")]
    UnknownSource(String),

    #[error("page source broke its contract: {0}")]
    Contract(String),
}

impl FeedError {
    /// Whether the page source simply could not produce data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FeedError::Transport(_)
                | FeedError::Http(_)
                | FeedError::Status { .. }
                | FeedError::Decode(_)
                | FeedError::Feed(_)
        )
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
