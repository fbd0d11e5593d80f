//! Raw record → [`Article`] conversion.
//!
//! [`normalize`] is total: every field has a fallback, so a record never
//! fails to convert.  The reference time `now` is passed in rather than read
//! from the clock so that a whole batch shares one instant and tests are
//! deterministic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::article::Article;
use crate::source::RawArticle;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_CATEGORY: &str = "General";
pub const NO_CONTENT: &str = "No content available.";

/// Grey "No Image" SVG used when a record has no picture.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNDAwIiBoZWlnaHQ9IjMwMCIgdmlld0JveD0iMCAwIDQwMCAzMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSI0MDAiIGhlaWdodD0iMzAwIiBmaWxsPSIjRjNGNEY2Ii8+CjxwYXRoIGQ9Ik0xODAgMTMwSDE2MFYxMTBIMTgwVjEzMFpNMjQwIDE2MEgxODBWMTcwSDI0MFYxNjBaIiBmaWxsPSIjOUNBM0FGIi8+Cjx0ZXh0IHg9IjIwMCIgeT0iMTkwIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmaWxsPSIjOUNBM0FGIiBmb250LWZhbWlseT0iQXJpYWwsIHNhbnMtc2VyaWYiIGZvbnQtc2l6ZT0iMTQiPk5vIEltYWdlPC90ZXh0Pgo8L3N2Zz4K";

/// Convert one raw record at position `index` into an [`Article`].
pub fn normalize(raw: RawArticle, index: usize, now: DateTime<Utc>) -> Article {
    let published_at = raw
        .published_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(now);

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let description = non_empty(raw.description);
    let content = non_empty(raw.content)
        .or_else(|| description.clone())
        .unwrap_or_default();

    let category = raw
        .source
        .and_then(|s| non_empty(s.name))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Article {
        id: index.to_string(),
        title,
        rendered_content: render_content(&content),
        content,
        excerpt: description.unwrap_or_default(),
        author: non_empty(raw.author).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        published_at,
        image_url: non_empty(raw.url_to_image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        category,
        tags: Vec::new(),
        url: raw.url.unwrap_or_default(),
        relative_date: relative_label(published_at, now),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (with offset), offset-less ISO 8601 date-times and plain
/// dates (read as UTC), and RFC 2822.  Returns `None` for anything else.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Elapsed time between `published` and `now`, as "{m}m ago", "{h}h ago" or
/// "{d}d ago".
///
/// Each unit is floor-divided from the previous one.  Future timestamps are
/// not clamped and produce a negative minute count.
pub fn relative_label(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published).num_milliseconds().div_euclid(60_000);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

/// Long US-style date, e.g. "October 19, 2026".
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%B %-d, %Y").to_string()
}

/// Escape markup and turn line breaks into `<br>`.
pub fn render_content(content: &str) -> String {
    if content.is_empty() {
        return NO_CONTENT.to_string();
    }

    html_escape::encode_quoted_attribute(content)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
