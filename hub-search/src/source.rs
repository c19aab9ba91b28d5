//! Trait definition for the per-category search sources.
//!
//! Each source (GitHub, Google Custom Search, YouTube) implements [`Source`]
//! to provide a uniform interface for querying one external API and mapping
//! its JSON payload to that category's record type.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::Category;

/// A pluggable search source for one result category.
///
/// Implementors handle their own:
///
/// - URL construction with query encoding
/// - HTTP request with the right credentials
/// - Mapping of the JSON payload to [`Source::Record`]
///
/// Failures are returned as [`SearchError`]; the orchestrator downgrades
/// them to an empty list. All implementations must be `Send + Sync` so
/// sources can be queried concurrently.
pub trait Source: Send + Sync {
    /// The record type this source produces.
    type Record: Send;

    /// Fetch at most `limit` records for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, times out, answers with
    /// a non-success status, or the body is not the expected JSON.
    fn fetch(
        &self,
        query: &str,
        limit: usize,
        client: &reqwest::Client,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Self::Record>, SearchError>> + Send;

    /// Which [`Category`] this source serves.
    fn category(&self) -> Category;

    /// Display name of the backing API, used in logs and errors.
    fn name(&self) -> &'static str;
}
