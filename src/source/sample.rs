//! Built-in page source with simulated network latency.
//!
//! Serves a fixed list of posts (the page's shipped samples by default, or
//! posts loaded from a JSON file) and waits a configurable delay before each
//! page, so skeletons and the loading state are visible without a server.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::{page_of, sample_posts, PageSource, Post};
use crate::error::{FeedError, FeedResult};

/// Delay before every page, mirroring the original page's fake API call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

pub struct SampleSource {
    posts: Vec<Post>,
    latency: Duration,
}

impl SampleSource {
    /// The shipped sample posts with the default latency.
    pub fn new() -> Self {
        Self::with_posts(sample_posts())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            latency: DEFAULT_LATENCY,
        }
    }

    /// Load posts from a JSON array on disk.
    pub fn from_json_file(path: &Path) -> FeedResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FeedError::Transport(format!("cannot read {}: {e}", path.display()))
        })?;
        let posts: Vec<Post> = serde_json::from_str(&raw)?;
        Ok(Self::with_posts(posts))
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self, page: usize, page_size: usize) -> FeedResult<Vec<Post>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(page_of(&self.posts, page, page_size))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn first_page_holds_all_three_samples() {
        let src = SampleSource::new().latency(Duration::ZERO);
        let page = src.fetch(1, 6).await.unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page[0].id, 1);
        assert_eq!(page[2].id, 3);
    }

    #[tokio::test]
    async fn second_page_is_empty() {
        let src = SampleSource::new().latency(Duration::ZERO);
        assert!(src.fetch(2, 6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn waits_for_latency_before_answering() {
        let latency = Duration::from_millis(20);
        let src = SampleSource::new().latency(latency);
        let started = tokio::time::Instant::now();
        src.fetch(1, 6).await.unwrap();
        assert!(started.elapsed() >= latency);
    }

    #[test]
    fn loads_posts_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 10, "title": "From disk", "date": "2024-03-01"}}]"#
        )
        .unwrap();

        let src = SampleSource::from_json_file(file.path()).unwrap();
        assert_eq!(src.posts.len(), 1);
    }

    #[test]
    fn missing_json_file_is_a_transport_failure() {
        let err = SampleSource::from_json_file(Path::new("/definitely/not/here.json"))
            .err()
            .unwrap();
        assert!(err.is_transport());
    }

    #[test]
    fn name_is_sample() {
        assert_eq!(SampleSource::new().name(), "sample");
    }
}
