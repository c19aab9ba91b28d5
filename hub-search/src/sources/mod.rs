//! Search source implementations.
//!
//! Each module provides a struct implementing [`crate::source::Source`] for
//! one external JSON API, plus a pure `parse_*_response` function that maps
//! a decoded payload to records and is tested against fixtures.

pub mod github;
pub mod google;
pub mod youtube;

pub use github::GitHubSource;
pub use google::GoogleSource;
pub use youtube::YouTubeSource;

use crate::error::SearchError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode every element of the payload's `items` array as `T`.
///
/// A missing or `null` `items` key means "no results". Elements that do not
/// match `T` are skipped with a debug log; the rest of the batch is kept.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the payload is not an object or
/// `items` is present but not an array.
pub(crate) fn decode_items<T: DeserializeOwned>(
    body: &Value,
    source_name: &'static str,
) -> Result<Vec<T>, SearchError> {
    let object = body
        .as_object()
        .ok_or_else(|| SearchError::Parse(format!("{source_name} payload is not an object")))?;

    let items = match object.get("items") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SearchError::Parse(format!(
                "{source_name} payload has a non-array `items`"
            )))
        }
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(record) => decoded.push(record),
            Err(e) => {
                tracing::debug!(
                    source = source_name,
                    position,
                    error = %e,
                    "skipping malformed item"
                );
            }
        }
    }
    Ok(decoded)
}

/// Treat `None` and blank strings alike, falling back to `default`.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
