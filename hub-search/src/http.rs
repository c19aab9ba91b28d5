//! Shared HTTP client and JSON GET helper for the search APIs.
//!
//! Provides a configured [`reqwest::Client`] and a single request helper
//! that classifies failures into [`SearchError`] variants.

use crate::config::SearchConfig;
use crate::error::SearchError;
use serde_json::Value;
use url::Url;

/// Build a [`reqwest::Client`] configured for the search APIs.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Join `path` onto `base` and append query parameters.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `base` is not a valid URL.
pub fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, SearchError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse_with_params(&joined, params)
        .map_err(|e| SearchError::Config(format!("invalid endpoint {joined}: {e}")))
}

/// Send a GET request and decode the body as JSON.
///
/// `bearer` is sent as an `Authorization: Bearer` header when present.
///
/// # Errors
///
/// - [`SearchError::Timeout`] when the client timeout fires
/// - [`SearchError::Http`] when the request cannot be sent or read
/// - [`SearchError::Status`] on a non-2xx status
/// - [`SearchError::Parse`] when the body is not valid JSON
pub async fn get_json(
    client: &reqwest::Client,
    source_name: &'static str,
    url: Url,
    bearer: Option<&str>,
) -> Result<Value, SearchError> {
    let mut request = client.get(url).header("Accept", "application/json");
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| classify(source_name, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            source_name,
            code: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify(source_name, e))?;

    tracing::trace!(source = source_name, bytes = body.len(), "response received");

    serde_json::from_slice(&body)
        .map_err(|e| SearchError::Parse(format!("{source_name} returned invalid JSON: {e}")))
}

fn classify(source_name: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{source_name}: {err}"))
    } else {
        SearchError::Http(format!("{source_name} request failed: {err}"))
    }
}
