//! Google Custom Search for web articles, re-ranked by TF-IDF relevance.
//!
//! Uses the JSON endpoint `GET /customsearch/v1`, which needs an API key and
//! a search engine id (`cx`). Only articles carry free-text snippets, so the
//! relevance ranking runs inside this source rather than in the orchestrator.

use crate::config::{require, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::ranking;
use crate::source::Source;
use crate::types::{ArticleResult, Category};
use serde::Deserialize;
use serde_json::Value;

use super::decode_items;

/// Google Custom Search source.
pub struct GoogleSource;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    display_link: Option<String>,
    formatted_url: Option<String>,
}

impl From<RawArticle> for ArticleResult {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            link: raw.link.unwrap_or_default(),
            snippet: raw.snippet.unwrap_or_default(),
            display_link: raw.display_link.unwrap_or_default(),
            formatted_url: raw.formatted_url.unwrap_or_default(),
            relevance: 0.0,
        }
    }
}

impl Source for GoogleSource {
    type Record = ArticleResult;

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        client: &reqwest::Client,
        config: &SearchConfig,
    ) -> Result<Vec<ArticleResult>, SearchError> {
        tracing::trace!(query, limit, "Google search");

        let key = require(&config.google_api_key, "google_api_key")?;
        let cx = require(&config.google_cx, "google_cx")?;
        let num = limit.to_string();
        let url = http::endpoint(
            &config.google_api_base,
            "customsearch/v1",
            &[("q", query), ("key", key), ("cx", cx), ("num", num.as_str())],
        )?;

        let body = http::get_json(client, self.name(), url, None).await?;
        parse_google_response(&body, query, limit)
    }

    fn category(&self) -> Category {
        Category::Article
    }

    fn name(&self) -> &'static str {
        "Google"
    }
}

/// Map a Custom Search payload to articles, rank them against `query`, and
/// keep the `limit` most relevant.
pub fn parse_google_response(
    body: &Value,
    query: &str,
    limit: usize,
) -> Result<Vec<ArticleResult>, SearchError> {
    let raw: Vec<RawArticle> = decode_items(body, "Google")?;
    let articles: Vec<ArticleResult> = raw.into_iter().map(ArticleResult::from).collect();
    let mut ranked = ranking::rank(query, articles);
    ranked.truncate(limit);
    tracing::debug!(count = ranked.len(), "Google results parsed");
    Ok(ranked)
}
