//! Remote article sources.
//!
//! This module defines the [`ArticleSource`] trait and the raw wire types
//! ([`RawArticle`] and friends).  The production implementation is
//! [`HttpSource`], which pulls the whole collection from a fixed JSON
//! endpoint in a single request.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `file.rs`).
//! 2. Define a struct and implement [`ArticleSource`] for it.
//! 3. Add `mod file;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` instead of [`HttpSource`].
//!
//! Normalization, caching and paging are source-agnostic; a source only has
//! to hand back raw records in the order they should be shown.

#[cfg(test)]
pub(crate) mod fake;
mod http;
mod raw;

pub use http::HttpSource;
pub use raw::{RawArticle, RawResponse, RawSource};

use async_trait::async_trait;

use crate::error::Result;

/// Trait that every article source must implement.
///
/// The store calls [`fetch()`](ArticleSource::fetch) at most once per
/// successful initialization, from whichever task first needs the data, so
/// implementations must be [`Send`] + [`Sync`].
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the complete, already-ordered collection of raw records.
    async fn fetch(&self) -> Result<Vec<RawArticle>>;
}
