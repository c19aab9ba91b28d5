//! # hub-search
//!
//! Learning-resource search for ResourceHub.
//!
//! Given a free-text query, this crate fetches code repositories (GitHub),
//! web articles (Google Custom Search) and videos (YouTube), ranks the
//! articles by TF-IDF cosine similarity to the query, and merges the three
//! result streams into per-category lists plus one interleaved view.
//!
//! ## Design
//!
//! - One [`Source`] per category, each mapping its JSON payload through an
//!   explicit serde schema with defaults
//! - Sources are queried concurrently; each is bounded by a timeout
//! - A failing source yields an empty list and a [`SourceReport`], never an
//!   error, so one outage cannot abort the others
//! - No caching, no retries, no state kept between queries
//!
//! ## Security
//!
//! - API keys are supplied by the caller and never logged
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod ranking;
pub mod source;
pub mod sources;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use source::Source;
pub use types::{
    AggregatedResults, ArticleResult, Category, CategoryLimits, CombinedEntry, EnabledCategories,
    RepoResult, ResultRef, SearchQuery, SourceReport, SourceStatus, VideoResult,
};

/// Search every enabled category for `query`.
///
/// Disabled categories come back empty with a
/// [`SourceStatus::Disabled`] report. Source failures (network, timeout,
/// non-2xx status, malformed JSON) are logged and reported as
/// [`SourceStatus::Failed`]; a missing credential is reported as
/// [`SourceStatus::Skipped`] since no request went out. Either way that
/// category is empty.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use hub_search::{Category, EnabledCategories, SearchConfig, SearchQuery};
///
/// let config = SearchConfig {
///     google_api_key: Some("key".into()),
///     google_cx: Some("cx".into()),
///     ..Default::default()
/// };
/// let query = SearchQuery::new("machine learning", 5);
/// let enabled = EnabledCategories::only(&[Category::Article, Category::Repo]);
/// let results = hub_search::search(&query, enabled, &config).await;
/// for item in results.combined_records() {
///     println!("[{}] {}: {}", item.category(), item.title(), item.url());
/// }
/// # }
/// ```
pub async fn search(
    query: &SearchQuery,
    enabled: EnabledCategories,
    config: &SearchConfig,
) -> AggregatedResults {
    orchestrator::search::orchestrate_search(query, enabled, config).await
}

/// The most-starred repositories on GitHub.
///
/// `limit` is clamped to `[1, 10]`. Returns an empty list on failure.
pub async fn trending_repositories(limit: usize, config: &SearchConfig) -> Vec<RepoResult> {
    orchestrator::search::trending_repositories(limit, config).await
}

/// The most-viewed YouTube videos for `topic`.
///
/// `limit` is clamped to `[1, 10]`. Returns an empty list on failure or for
/// a blank topic.
pub async fn popular_videos(topic: &str, limit: usize, config: &SearchConfig) -> Vec<VideoResult> {
    orchestrator::search::popular_videos(topic, limit, config).await
}

/// Rank article candidates by TF-IDF cosine similarity to `query`.
///
/// Convenience re-export of [`ranking::rank`].
pub fn rank(query: &str, candidates: Vec<ArticleResult>) -> Vec<ArticleResult> {
    ranking::rank(query, candidates)
}
