//! Error types for the hub-search crate.
//!
//! These errors never cross the public search API: every connector failure
//! is downgraded to an empty result list plus a [`crate::types::SourceStatus`]
//! report. They surface only from configuration validation and from the
//! individual [`crate::source::Source`] implementations.

/// Errors that can occur while talking to a search API.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The HTTP request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status code.
    #[error("unexpected status {code} from {source_name}")]
    Status {
        /// Name of the API that answered.
        source_name: &'static str,
        /// HTTP status code.
        code: u16,
    },

    /// The response body was not the JSON we expected.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid or incomplete configuration (missing credentials, bad URL).
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether this error is transient (network, timeout, status).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Http(_) | Self::Status { .. }
        )
    }
}

/// Convenience type alias for hub-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
