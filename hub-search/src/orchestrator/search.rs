//! Core search orchestrator: concurrent per-category fan-out and merge.
//!
//! Queries every enabled source concurrently, bounds each one by the
//! configured timeout, turns failures into empty sequences plus a
//! [`SourceReport`], and interleaves the results into the combined view.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::Source;
use crate::sources::github::TRENDING_QUERY;
use crate::sources::{GitHubSource, GoogleSource, YouTubeSource};
use crate::types::{
    clamp_limit, AggregatedResults, Category, EnabledCategories, RepoResult, SearchQuery,
    SourceReport, SourceStatus, VideoResult,
};

use super::interleave::interleave;

/// Orchestrate one search across the enabled sources.
///
/// # Pipeline
///
/// 1. A blank query returns empty results without any request
/// 2. Fan out to the enabled sources concurrently with [`futures::join!`]
/// 3. Each source is bounded by `config.timeout_seconds`
/// 4. Failures are logged at warn level and become empty sequences
/// 5. The combined view is interleaved in video, article, repo order
///
/// Never fails: the worst outcome is four empty sequences.
pub async fn orchestrate_search(
    query: &SearchQuery,
    enabled: EnabledCategories,
    config: &SearchConfig,
) -> AggregatedResults {
    if query.is_blank() {
        tracing::debug!("blank query, nothing to fetch");
        return AggregatedResults::default();
    }

    let client = match http::build_client(config) {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(error = %err, "cannot build HTTP client");
            return failed_everywhere(enabled, &err);
        }
    };

    let text = query.text.trim();
    let limits = query.limits;
    let video_source = YouTubeSource::default();

    let (video, article, repo) = futures::join!(
        collect_source(
            &video_source,
            text,
            limits.get(Category::Video),
            enabled.contains(Category::Video),
            &client,
            config,
        ),
        collect_source(
            &GoogleSource,
            text,
            limits.get(Category::Article),
            enabled.contains(Category::Article),
            &client,
            config,
        ),
        collect_source(
            &GitHubSource,
            text,
            limits.get(Category::Repo),
            enabled.contains(Category::Repo),
            &client,
            config,
        ),
    );
    let (videos, video_report) = video;
    let (articles, article_report) = article;
    let (repos, repo_report) = repo;

    let combined = interleave(&[
        (Category::Video, videos.len()),
        (Category::Article, articles.len()),
        (Category::Repo, repos.len()),
    ]);

    AggregatedResults {
        videos,
        articles,
        repos,
        combined,
        reports: vec![video_report, article_report, repo_report],
    }
}

/// Query one source, downgrading every failure to an empty list.
///
/// Disabled sources are not contacted. The returned list never holds more
/// than `limit` records.
pub async fn collect_source<S: Source>(
    source: &S,
    query: &str,
    limit: usize,
    enabled: bool,
    client: &reqwest::Client,
    config: &SearchConfig,
) -> (Vec<S::Record>, SourceReport) {
    let category = source.category();
    if !enabled {
        return (
            Vec::new(),
            SourceReport {
                category,
                status: SourceStatus::Disabled,
            },
        );
    }

    let outcome =
        match tokio::time::timeout(config.timeout(), source.fetch(query, limit, client, config))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout(format!(
                "{} did not answer within {}s",
                source.name(),
                config.timeout_seconds
            ))),
        };

    match outcome {
        Ok(mut records) => {
            records.truncate(limit);
            let count = records.len();
            tracing::debug!(%category, source = source.name(), count, "source returned results");
            (
                records,
                SourceReport {
                    category,
                    status: SourceStatus::Ok { count },
                },
            )
        }
        Err(err) => {
            tracing::warn!(%category, source = source.name(), error = %err, "source query failed");
            let reason = err.to_string();
            let status = match err {
                SearchError::Config(_) => SourceStatus::Skipped { reason },
                _ => SourceStatus::Failed { reason },
            };
            (Vec::new(), SourceReport { category, status })
        }
    }
}

/// The most-starred repositories overall, independent of any query.
pub async fn trending_repositories(limit: usize, config: &SearchConfig) -> Vec<RepoResult> {
    let Some(client) = client_or_log(config) else {
        return Vec::new();
    };
    let (repos, _) = collect_source(
        &GitHubSource,
        TRENDING_QUERY,
        clamp_limit(limit),
        true,
        &client,
        config,
    )
    .await;
    repos
}

/// The most-viewed videos for `topic`. A blank topic yields nothing.
pub async fn popular_videos(topic: &str, limit: usize, config: &SearchConfig) -> Vec<VideoResult> {
    if topic.trim().is_empty() {
        return Vec::new();
    }
    let Some(client) = client_or_log(config) else {
        return Vec::new();
    };
    let (videos, _) = collect_source(
        &YouTubeSource::most_viewed(),
        topic.trim(),
        clamp_limit(limit),
        true,
        &client,
        config,
    )
    .await;
    videos
}

fn client_or_log(config: &SearchConfig) -> Option<reqwest::Client> {
    http::build_client(config)
        .map_err(|err| tracing::warn!(error = %err, "cannot build HTTP client"))
        .ok()
}

fn failed_everywhere(enabled: EnabledCategories, err: &SearchError) -> AggregatedResults {
    let reports = Category::all()
        .iter()
        .map(|&category| SourceReport {
            category,
            status: if enabled.contains(category) {
                SourceStatus::Skipped {
                    reason: err.to_string(),
                }
            } else {
                SourceStatus::Disabled
            },
        })
        .collect();
    AggregatedResults {
        reports,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowSource;

    impl Source for SlowSource {
        type Record = RepoResult;

        async fn fetch(
            &self,
            _query: &str,
            _limit: usize,
            _client: &reqwest::Client,
            _config: &SearchConfig,
        ) -> Result<Vec<RepoResult>, SearchError> {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        fn category(&self) -> Category {
            Category::Repo
        }

        fn name(&self) -> &'static str {
            "Slow"
        }
    }

    struct ManySource;

    impl Source for ManySource {
        type Record = u32;

        async fn fetch(
            &self,
            _query: &str,
            _limit: usize,
            _client: &reqwest::Client,
            _config: &SearchConfig,
        ) -> Result<Vec<u32>, SearchError> {
            Ok((0..20).collect())
        }

        fn category(&self) -> Category {
            Category::Video
        }

        fn name(&self) -> &'static str {
            "Many"
        }
    }

    fn test_config() -> SearchConfig {
        SearchConfig {
            timeout_seconds: 1,
            ..Default::default()
        }
        .with_base_url("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn blank_query_returns_empty_without_requests() {
        let results = orchestrate_search(
            &SearchQuery::new("   ", 5),
            EnabledCategories::all(),
            &test_config(),
        )
        .await;
        assert!(results.is_empty());
        assert!(results.combined.is_empty());
        assert!(results.reports.is_empty());
    }

    #[tokio::test]
    async fn disabled_source_is_not_contacted() {
        let client = reqwest::Client::new();
        let (records, report) =
            collect_source(&SlowSource, "q", 5, false, &client, &test_config()).await;
        assert!(records.is_empty());
        assert_eq!(report.status, SourceStatus::Disabled);
        assert!(!report.was_requested());
    }

    #[tokio::test]
    async fn slow_source_times_out_to_empty() {
        let client = reqwest::Client::new();
        let (records, report) =
            collect_source(&SlowSource, "q", 5, true, &client, &test_config()).await;
        assert!(records.is_empty());
        match report.status {
            SourceStatus::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_answers_are_truncated_to_limit() {
        let client = reqwest::Client::new();
        let (records, report) =
            collect_source(&ManySource, "q", 3, true, &client, &test_config()).await;
        assert_eq!(records, vec![0, 1, 2]);
        assert_eq!(report.status, SourceStatus::Ok { count: 3 });
    }

    #[tokio::test]
    async fn unreachable_sources_degrade_to_empty() {
        // Port 9 (discard) is closed locally; every enabled source fails fast.
        let config = SearchConfig {
            google_api_key: Some("k".into()),
            google_cx: Some("cx".into()),
            youtube_api_key: Some("k".into()),
            ..test_config()
        };
        let results =
            orchestrate_search(&SearchQuery::new("rust", 5), EnabledCategories::all(), &config)
                .await;
        assert!(results.is_empty());
        assert!(results.combined.is_empty());
        assert_eq!(results.reports.len(), 3);
        assert!(results.reports.iter().all(SourceReport::is_failure));
    }

    #[tokio::test]
    async fn missing_credentials_fail_only_their_category() {
        let results = orchestrate_search(
            &SearchQuery::new("rust", 5),
            EnabledCategories::only(&[Category::Article]),
            &test_config(),
        )
        .await;
        let article = results.report(Category::Article).expect("article report");
        assert!(article.is_failure());
        assert!(!article.was_requested());
        match &article.status {
            SourceStatus::Skipped { reason } => assert!(reason.contains("google_api_key")),
            other => panic!("expected skipped, got {other:?}"),
        }
        assert_eq!(
            results.report(Category::Video).map(|r| &r.status),
            Some(&SourceStatus::Disabled)
        );
        assert_eq!(
            results.report(Category::Repo).map(|r| &r.status),
            Some(&SourceStatus::Disabled)
        );
    }

    #[tokio::test]
    async fn popular_videos_blank_topic_is_empty() {
        assert!(popular_videos("  ", 5, &test_config()).await.is_empty());
    }

    #[test]
    fn failed_everywhere_respects_enabled_set() {
        let err = SearchError::Http("boom".into());
        let results = failed_everywhere(EnabledCategories::only(&[Category::Repo]), &err);
        assert_eq!(results.reports.len(), 3);
        assert_eq!(results.reports[0].status, SourceStatus::Disabled);
        assert!(results.reports[2].is_failure());
        assert!(!results.reports[2].was_requested());
    }

    #[tokio::test]
    async fn search_runs_with_a_video_source_built_per_query() {
        let config = SearchConfig {
            youtube_api_key: Some("k".into()),
            ..test_config()
        };
        let results = orchestrate_search(
            &SearchQuery::new("rust", 2),
            EnabledCategories::only(&[Category::Video]),
            &config,
        )
        .await;
        let video = results.report(Category::Video).expect("video report");
        assert!(matches!(video.status, SourceStatus::Failed { .. }));
        assert!(video.was_requested());
    }
}
