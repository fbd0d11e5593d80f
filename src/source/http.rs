//! HTTP article source.
//!
//! Fetches the article envelope from a JSON endpoint with [`reqwest`] and
//! hands back the raw records untouched.  Parsing the body is split out
//! into [`HttpSource::parse_body`] so it can be tested without a network.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ArticleSource, RawArticle, RawResponse};
use crate::error::{FetchError, Result};

/// Reads the full article collection from one fixed URL.
pub struct HttpSource {
    /// The endpoint serving the article envelope.
    pub url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a new HTTP source.
    ///
    /// # Arguments
    ///
    /// * `url` — full URL of the JSON feed.
    /// * `timeout` — upper bound for the whole request, body included.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsreel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Decode a response body into raw records, keeping feed order.
    pub fn parse_body(body: &[u8]) -> Result<Vec<RawArticle>> {
        let envelope: RawResponse = serde_json::from_slice(body)?;
        Ok(envelope.articles)
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<RawArticle>> {
        debug!(url = %self.url, "fetching article feed");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let articles = Self::parse_body(&body)?;
        debug!(count = articles.len(), "article feed decoded");
        Ok(articles)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
