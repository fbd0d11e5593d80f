//! In-memory source for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{ArticleSource, RawArticle};
use crate::error::{FetchError, Result};

/// Serves `count` generated records, failing the first `failures` calls.
pub struct FakeSource {
    count: usize,
    failures: usize,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            failures: 0,
            delay: Duration::from_millis(5),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(count: usize, failures: usize) -> Self {
        Self {
            failures,
            ..Self::new(count)
        }
    }

    /// How many times `fetch` has been entered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch(&self) -> Result<Vec<RawArticle>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        if call < self.failures {
            return Err(FetchError::Other("connection reset".into()));
        }

        Ok((0..self.count)
            .map(|i| RawArticle {
                title: Some(format!("Article {i}")),
                url: Some(format!("https://example.com/{i}")),
                ..Default::default()
            })
            .collect())
    }
}
