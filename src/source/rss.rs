//! RSS page source.
//!
//! Reads a blog's RSS channel and serves its items one page at a time.  The
//! channel is downloaded on the first request and kept for the rest of the
//! session, so later pages are sliced from memory and stay consistent with
//! the first one.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use tokio::sync::OnceCell;

use super::{page_of, PageSource, Post};
use crate::error::FeedResult;

/// An RSS feed page source.
pub struct RssSource {
    /// The feed URL.
    pub url: String,
    /// A human-readable label shown in the status bar.
    pub label: String,
    client: reqwest::Client,
    posts: OnceCell<Vec<Post>>,
}

impl RssSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            client: reqwest::Client::new(),
            posts: OnceCell::new(),
        }
    }

    /// Convert an already-fetched [`rss::Channel`] into [`Post`]s.
    ///
    /// Pure function (no I/O) so the mapping can be tested offline.  Post ids
    /// are channel positions starting at 1, which keeps them unique and
    /// positive even when items carry no usable guid.
    pub fn parse_channel(channel: &rss::Channel) -> Vec<Post> {
        channel
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                // RFC-2822 date; undated items get the epoch so they still render.
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.date_naive())
                    .unwrap_or(NaiveDate::MIN);

                Post {
                    id: i as u64 + 1,
                    title: item.title().unwrap_or("(untitled)").to_string(),
                    excerpt: item.description().unwrap_or_default().to_string(),
                    published,
                    image: item
                        .enclosure()
                        .map(|e| e.url().to_string())
                        .unwrap_or_default(),
                    link: item.link().unwrap_or("#").to_string(),
                }
            })
            .collect()
    }

    async fn load(&self) -> FeedResult<Vec<Post>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = rss::Channel::read_from(body.as_ref())?;
        let posts = Self::parse_channel(&channel);
        tracing::info!(url = %self.url, items = posts.len(), "loaded RSS channel");
        Ok(posts)
    }
}

#[async_trait]
impl PageSource for RssSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self, page: usize, page_size: usize) -> FeedResult<Vec<Post>> {
        // A failed download leaves the cell empty, so a retry downloads again.
        let posts = self.posts.get_or_try_init(|| self.load()).await?;
        Ok(page_of(posts, page, page_size))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_channel_extracts_posts() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Blog</title>
    <item>
      <title>First Post</title>
      <link>https://example.com/1</link>
      <guid>guid-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description>First description</description>
      <enclosure url="https://example.com/1.jpg" length="0" type="image/jpeg"/>
    </item>
    <item>
      <title>Second Post</title>
      <link>https://example.com/2</link>
      <pubDate>Tue, 02 Jan 2024 12:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let posts = RssSource::parse_channel(&channel);

        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[0].title, "First Post");
        assert_eq!(posts[0].link, "https://example.com/1");
        assert_eq!(posts[0].excerpt, "First description");
        assert_eq!(posts[0].image, "https://example.com/1.jpg");
        assert_eq!(
            posts[0].published,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );

        assert_eq!(posts[1].id, 2);
        assert!(posts[1].excerpt.is_empty());
        assert!(posts[1].image.is_empty());
    }

    #[test]
    fn handles_missing_title_and_link() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <guid>g1</guid>
    </item>
  </channel>
</rss>"#;

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let posts = RssSource::parse_channel(&channel);

        assert_eq!(posts[0].title, "(untitled)");
        assert_eq!(posts[0].link, "#");
    }

    #[test]
    fn handles_invalid_date() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <title>Bad Date</title>
      <pubDate>not-a-real-date</pubDate>
    </item>
  </channel>
</rss>"#;

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let posts = RssSource::parse_channel(&channel);

        assert_eq!(posts[0].published, NaiveDate::MIN);
    }

    #[test]
    fn name_returns_label() {
        let src = RssSource::new("http://example.com/feed", "My Blog");
        assert_eq!(src.name(), "My Blog");
    }
}
