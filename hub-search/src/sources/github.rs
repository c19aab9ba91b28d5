//! GitHub repository search, most-starred first.
//!
//! Uses the REST search endpoint `GET /search/repositories` with
//! `sort=stars&order=desc`. Works without a token at a lower rate limit.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::Source;
use crate::types::{Category, RepoResult};
use serde::Deserialize;
use serde_json::Value;

use super::{decode_items, or_default};

/// Query used for the trending-repositories feed.
pub const TRENDING_QUERY: &str = "stars:>1000";

/// Placeholder for absent owner, language and timestamp fields.
pub const UNKNOWN: &str = "Unknown";

/// GitHub repository search.
pub struct GitHubSource;

#[derive(Debug, Deserialize)]
struct RawRepo {
    name: String,
    html_url: String,
    stargazers_count: Option<u64>,
    owner: Option<RawOwner>,
    description: Option<String>,
    language: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: Option<String>,
}

impl From<RawRepo> for RepoResult {
    fn from(raw: RawRepo) -> Self {
        Self {
            name: raw.name,
            url: raw.html_url,
            stars: raw.stargazers_count.unwrap_or(0),
            owner: or_default(raw.owner.and_then(|o| o.login), UNKNOWN),
            description: raw.description.unwrap_or_default(),
            language: or_default(raw.language, UNKNOWN),
            updated_at: or_default(raw.updated_at, UNKNOWN),
        }
    }
}

impl Source for GitHubSource {
    type Record = RepoResult;

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        client: &reqwest::Client,
        config: &SearchConfig,
    ) -> Result<Vec<RepoResult>, SearchError> {
        tracing::trace!(query, limit, "GitHub search");

        let per_page = limit.to_string();
        let url = http::endpoint(
            &config.github_api_base,
            "search/repositories",
            &[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ],
        )?;

        let body = http::get_json(client, self.name(), url, config.github_token.as_deref()).await?;
        parse_github_response(&body, limit)
    }

    fn category(&self) -> Category {
        Category::Repo
    }

    fn name(&self) -> &'static str {
        "GitHub"
    }
}

/// Map a GitHub search payload to at most `limit` repositories.
///
/// Items without `name` or `html_url` are skipped; every other field falls
/// back to a placeholder.
pub fn parse_github_response(body: &Value, limit: usize) -> Result<Vec<RepoResult>, SearchError> {
    let raw: Vec<RawRepo> = decode_items(body, "GitHub")?;
    let repos: Vec<RepoResult> = raw.into_iter().take(limit).map(RepoResult::from).collect();
    tracing::debug!(count = repos.len(), "GitHub results parsed");
    Ok(repos)
}
