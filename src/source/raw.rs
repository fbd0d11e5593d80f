//! Wire format of the remote article feed.
//!
//! These types mirror the JSON envelope served by the article endpoint
//! (`{ "status": ..., "totalResults": ..., "articles": [...] }`).  They are
//! deliberately loose: every field may be missing or `null`, so a single
//! malformed record never fails the whole fetch.  Turning them into
//! something the UI can show is the job of [`crate::normalize`].

use serde::Deserialize;

/// The publisher block attached to each record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single article exactly as the remote feed sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawArticle {
    pub source: Option<RawSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// Response envelope.  A body without an `articles` array is an empty feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawResponse {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Vec<RawArticle>,
}
