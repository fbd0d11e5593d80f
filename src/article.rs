//! The domain article shown by the reader.
//!
//! `Article` is what every raw feed record becomes after
//! [`normalize`](crate::normalize::normalize).  All fields are filled in,
//! so the store and the UI never deal with missing data.
//!
//! ## Identifiers
//!
//! `id` is the record's zero-based position in the fetched collection.  It
//! is stable only for the lifetime of one successful fetch; it is **not** a
//! persistent key and must not be stored anywhere that outlives the store.

use chrono::{DateTime, Utc};

/// A single article, normalised from the remote feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Position in the fetched collection, as a string.
    pub id: String,

    /// Trimmed headline, never empty.
    pub title: String,

    /// Full text, falling back to the description, then to `""`.
    pub content: String,

    /// Short summary (the feed's description), possibly empty.
    pub excerpt: String,

    pub author: String,

    /// Publication instant; the normalisation time when the feed's date was
    /// missing or unreadable.
    pub published_at: DateTime<Utc>,

    pub image_url: String,

    /// Publisher name, or "General".
    pub category: String,

    /// Always empty: the feed carries no tag information.
    pub tags: Vec<String>,

    /// Canonical link to the original article.
    pub url: String,

    /// Elapsed-time label such as "3h ago", computed at normalisation time.
    pub relative_date: String,

    /// HTML-safe rendering of `content` with `<br>` line breaks.
    pub rendered_content: String,
}

impl Article {
    /// Whether there is any body text beyond the headline.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
