//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries API credentials, endpoint base URLs and the
//! per-request timeout. It is an opaque value supplied by the caller; this
//! crate never reads files or environment variables.

use crate::error::SearchError;
use std::time::Duration;

/// Default GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
/// Default Google APIs base URL (Custom Search).
pub const GOOGLE_API_BASE: &str = "https://www.googleapis.com";
/// Default YouTube Data API base URL.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com";

/// Configuration for resource search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-source HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header sent to every API. GitHub rejects requests without one.
    pub user_agent: String,
    /// Optional GitHub token; raises the search rate limit when set.
    pub github_token: Option<String>,
    /// Google Custom Search API key.
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id (`cx`).
    pub google_cx: Option<String>,
    /// YouTube Data API key.
    pub youtube_api_key: Option<String>,
    /// Base URL for the repository search API.
    pub github_api_base: String,
    /// Base URL for the web search API.
    pub google_api_base: String,
    /// Base URL for the video search API.
    pub youtube_api_base: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 8,
            user_agent: format!("resourcehub/{}", env!("CARGO_PKG_VERSION")),
            github_token: None,
            google_api_key: None,
            google_cx: None,
            youtube_api_key: None,
            github_api_base: GITHUB_API_BASE.into(),
            google_api_base: GOOGLE_API_BASE.into(),
            youtube_api_base: YOUTUBE_API_BASE.into(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `user_agent` must not be empty
    /// - every base URL must parse as an absolute URL
    ///
    /// Missing credentials are not a validation error: the affected source
    /// degrades to an empty result list at search time.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        for (name, base) in [
            ("github_api_base", &self.github_api_base),
            ("google_api_base", &self.google_api_base),
            ("youtube_api_base", &self.youtube_api_base),
        ] {
            url::Url::parse(base)
                .map_err(|e| SearchError::Config(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Point every source at one base URL (used with mock servers).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.github_api_base = base.clone();
        self.google_api_base = base.clone();
        self.youtube_api_base = base;
        self
    }
}

/// Read a required credential, mapping absence to [`SearchError::Config`].
pub(crate) fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, SearchError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SearchError::Config(format!("{name} is not set")))
}
