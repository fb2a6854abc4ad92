//! JSON-over-HTTP page source.
//!
//! Requests `GET {base}?page={page}&per_page={size}` and expects a JSON array
//! of posts in response.

use std::time::Duration;

use async_trait::async_trait;

use super::{PageSource, Post};
use crate::error::{FeedError, FeedResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Decode a response body into posts.
    pub fn parse_page(body: &str) -> FeedResult<Vec<Post>> {
        Ok(serde_json::from_str(body)?)
    }
}

#[async_trait]
impl PageSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, page: usize, page_size: usize) -> FeedResult<Vec<Post>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page), ("per_page", page_size)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        Self::parse_page(&body)
    }
}
