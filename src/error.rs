//! Error types for fetching the article feed.
//!
//! Store operations never return these to their callers: a failed fetch is
//! logged with its cause and then reported through the store's state and
//! error fields as [`FetchError::USER_MESSAGE`].

use thiserror::Error;

/// Result type alias for fetcher operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Why the remote article feed could not be loaded.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("feed returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not a valid article envelope.
    #[error("invalid feed body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other source-specific failure.
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Message shown to readers whatever the underlying cause.
    pub const USER_MESSAGE: &'static str = "Unable to load articles. Please try again later.";

    /// HTTP status code associated with the failure, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            FetchError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_code() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.to_string(), "feed returned HTTP 503");
    }

    #[test]
    fn decode_error_has_no_status() {
        let err: FetchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.status_code().is_none());
        assert!(err.to_string().starts_with("invalid feed body"));
    }
}
