//! Page source abstraction layer.
//!
//! This module defines the [`PageSource`] trait and the common [`Post`] type.
//! Concrete sources live in sub-modules: [`sample`] (built-in posts with
//! simulated latency), [`http`] (a JSON endpoint) and [`rss`] (a paginated
//! RSS channel).
//!
//! ## For contributors: adding a new source
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct and implement [`PageSource`] for it.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` from the command-line options.
//!
//! The feed controller, skeletons, and infinite scroll are all source-agnostic.

mod http;
mod post;
mod rss;
mod sample;

pub use self::http::HttpSource;
pub use self::rss::RssSource;
pub use post::{sample_posts, Post};
pub use sample::{SampleSource, DEFAULT_LATENCY};

use async_trait::async_trait;

use crate::error::FeedResult;

/// Trait that every page source must implement.
///
/// The feed controller calls [`fetch()`](PageSource::fetch) on a spawned
/// tokio task, so implementations must be `Send + Sync + 'static`.
///
/// ## Contract
///
/// * Return at most `page_size` posts, in display order.
/// * Returning fewer than `page_size` posts (including none) means the end
///   of the data has been reached.  That is a success, not an error.
/// * Errors are reserved for transport problems (network, server, decoding).
/// * Never touch controller state; a source is a pure data provider.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Human-readable label shown in the status bar.
    fn name(&self) -> &str;

    /// Fetch one page.  `page` starts at 1.
    async fn fetch(&self, page: usize, page_size: usize) -> FeedResult<Vec<Post>>;
}

/// A page source chosen at runtime from the command line.
pub type DynSource = Box<dyn PageSource>;

#[async_trait]
impl PageSource for Box<dyn PageSource> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, page: usize, page_size: usize) -> FeedResult<Vec<Post>> {
        (**self).fetch(page, page_size).await
    }
}

/// Slice `posts` down to page `page` (1-based) of `page_size` entries.
///
/// Pages past the end are empty rather than an error.
pub fn page_of<T: Clone>(posts: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    posts
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_of_slices_consecutive_pages() {
        let data: Vec<u32> = (1..=8).collect();
        assert_eq!(page_of(&data, 1, 3), vec![1, 2, 3]);
        assert_eq!(page_of(&data, 2, 3), vec![4, 5, 6]);
        assert_eq!(page_of(&data, 3, 3), vec![7, 8], "short final page");
    }

    #[test]
    fn page_of_past_the_end_is_empty() {
        let data: Vec<u32> = (1..=3).collect();
        assert!(page_of(&data, 2, 6).is_empty());
        assert!(page_of(&data, 99, 6).is_empty());
    }
}
