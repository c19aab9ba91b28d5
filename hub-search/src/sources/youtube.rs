//! YouTube Data API video search.
//!
//! Uses `GET /youtube/v3/search?part=snippet&type=video`. Items whose `id`
//! carries no `videoId` cannot be linked to and are dropped.

use crate::config::{require, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::source::Source;
use crate::types::{Category, VideoResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::{decode_items, or_default};

/// Watch URL prefix; the video id is appended.
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Result ordering requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoOrder {
    /// The API's own relevance ordering.
    #[default]
    Relevance,
    /// Most viewed first.
    ViewCount,
}

impl VideoOrder {
    fn as_param(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::ViewCount => "viewCount",
        }
    }
}

/// YouTube video search source.
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeSource {
    /// Ordering passed to the API.
    pub order: VideoOrder,
}

impl YouTubeSource {
    /// Most-viewed-first ordering, used for the popular-videos feed.
    pub fn most_viewed() -> Self {
        Self {
            order: VideoOrder::ViewCount,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: Option<RawVideoId>,
    snippet: Option<RawSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideoId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnippet {
    title: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
    description: Option<String>,
    thumbnails: Option<HashMap<String, RawThumbnail>>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: Option<String>,
}

/// Pick the `medium` thumbnail, else `default`, else an empty string.
fn pick_thumbnail(thumbnails: Option<&HashMap<String, RawThumbnail>>) -> String {
    let Some(thumbnails) = thumbnails else {
        return String::new();
    };
    ["medium", "default"]
        .iter()
        .filter_map(|size| thumbnails.get(*size))
        .filter_map(|thumb| thumb.url.as_deref())
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_string()
}

impl RawVideo {
    fn into_result(self) -> Option<VideoResult> {
        let video_id = self
            .id
            .and_then(|id| id.video_id)
            .filter(|id| !id.trim().is_empty())?;
        let snippet = self.snippet.unwrap_or_default();
        let thumbnail = pick_thumbnail(snippet.thumbnails.as_ref());
        Some(VideoResult {
            title: or_default(snippet.title, "No title"),
            url: format!("{WATCH_URL}{video_id}"),
            channel: or_default(snippet.channel_title, "Unknown channel"),
            published_at: or_default(snippet.published_at, "Unknown date"),
            thumbnail,
            description: snippet.description.unwrap_or_default(),
        })
    }
}

impl Source for YouTubeSource {
    type Record = VideoResult;

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        client: &reqwest::Client,
        config: &SearchConfig,
    ) -> Result<Vec<VideoResult>, SearchError> {
        tracing::trace!(query, limit, order = self.order.as_param(), "YouTube search");

        let key = require(&config.youtube_api_key, "youtube_api_key")?;
        let max_results = limit.to_string();
        let url = http::endpoint(
            &config.youtube_api_base,
            "youtube/v3/search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("order", self.order.as_param()),
                ("key", key),
            ],
        )?;

        let body = http::get_json(client, self.name(), url, None).await?;
        parse_youtube_response(&body, limit)
    }

    fn category(&self) -> Category {
        Category::Video
    }

    fn name(&self) -> &'static str {
        "YouTube"
    }
}

/// Map a YouTube search payload to at most `limit` videos.
pub fn parse_youtube_response(body: &Value, limit: usize) -> Result<Vec<VideoResult>, SearchError> {
    let raw: Vec<RawVideo> = decode_items(body, "YouTube")?;
    let videos: Vec<VideoResult> = raw
        .into_iter()
        .filter_map(RawVideo::into_result)
        .take(limit)
        .collect();
    tracing::debug!(count = videos.len(), "YouTube results parsed");
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "kind": "youtube#searchListResponse",
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#video", "videoId": "aircAruvnKk"},
                    "snippet": {
                        "publishedAt": "2017-10-05T14:00:00Z",
                        "title": "But what is a neural network?",
                        "description": "Deep learning, chapter 1",
                        "channelTitle": "3Blue1Brown",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/vi/aircAruvnKk/default.jpg"},
                            "medium": {"url": "https://i.ytimg.com/vi/aircAruvnKk/mqdefault.jpg"}
                        }
                    }
                },
                {
                    "id": {"kind": "youtube#channel", "channelId": "UCYO_jab_esuFRV4b17AJtAw"},
                    "snippet": {"title": "A channel, not a video"}
                },
                {
                    "id": {"videoId": "Gv9_4yMHFhI"},
                    "snippet": {
                        "title": "Machine Learning Fundamentals",
                        "channelTitle": "StatQuest",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/vi/Gv9_4yMHFhI/default.jpg"}
                        }
                    }
                },
                {
                    "id": {"videoId": "noThumbs01"},
                    "snippet": {"title": "No thumbnails here"}
                }
            ]
        })
    }

    #[test]
    fn parses_full_item() {
        let videos = parse_youtube_response(&fixture(), 10).expect("parse");
        let first = &videos[0];
        assert_eq!(first.title, "But what is a neural network?");
        assert_eq!(first.url, "https://www.youtube.com/watch?v=aircAruvnKk");
        assert_eq!(first.channel, "3Blue1Brown");
        assert_eq!(first.published_at, "2017-10-05T14:00:00Z");
        assert_eq!(
            first.thumbnail,
            "https://i.ytimg.com/vi/aircAruvnKk/mqdefault.jpg"
        );
        assert_eq!(first.description, "Deep learning, chapter 1");
    }

    #[test]
    fn items_without_video_id_are_skipped() {
        let videos = parse_youtube_response(&fixture(), 10).expect("parse");
        assert_eq!(videos.len(), 3);
        assert!(videos.iter().all(|v| v.title != "A channel, not a video"));
    }

    #[test]
    fn thumbnail_falls_back_to_default_size() {
        let videos = parse_youtube_response(&fixture(), 10).expect("parse");
        assert_eq!(
            videos[1].thumbnail,
            "https://i.ytimg.com/vi/Gv9_4yMHFhI/default.jpg"
        );
    }

    #[test]
    fn missing_thumbnails_give_empty_string() {
        let videos = parse_youtube_response(&fixture(), 10).expect("parse");
        assert_eq!(videos[2].thumbnail, "");
        assert!(!videos[2].has_thumbnail());
    }

    #[test]
    fn missing_snippet_fields_use_placeholders() {
        let videos = parse_youtube_response(&fixture(), 10).expect("parse");
        assert_eq!(videos[2].channel, "Unknown channel");
        assert_eq!(videos[2].published_at, "Unknown date");
        assert_eq!(videos[2].description, "");
        let body = json!({"items": [{"id": {"videoId": "bare"}}]});
        let bare = parse_youtube_response(&body, 10).expect("parse");
        assert_eq!(bare[0].title, "No title");
    }

    #[test]
    fn limit_counts_only_kept_items() {
        let videos = parse_youtube_response(&fixture(), 2).expect("parse");
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[1].title, "Machine Learning Fundamentals");
    }

    #[test]
    fn string_id_item_is_skipped() {
        let body = json!({"items": [
            {"id": "plainstring", "snippet": {"title": "odd"}},
            {"id": {"videoId": "ok1"}, "snippet": {"title": "fine"}}
        ]});
        let videos = parse_youtube_response(&body, 10).expect("parse");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "fine");
    }

    #[test]
    fn order_params() {
        assert_eq!(YouTubeSource::default().order.as_param(), "relevance");
        assert_eq!(YouTubeSource::most_viewed().order.as_param(), "viewCount");
        assert_eq!(YouTubeSource::default().category(), Category::Video);
    }
}
