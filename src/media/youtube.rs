//! YouTube Data API v3 search client.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::search::{MediaKind, MediaSearch, SearchError, SearchHit};

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

pub struct YouTubeSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    playlist_id: Option<String>,
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl YouTubeSearchClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - YouTube Data API key.
    /// * `base_url` - API base URL, without trailing slash (e.g., [`YOUTUBE_API_BASE`]).
    /// * `timeout` - Per-request timeout.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn search_url(&self, query: &str, kind: MediaKind, max_results: u32) -> String {
        format!(
            "{}/search?part=snippet&q={}&type={}&maxResults={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            kind.as_str(),
            max_results,
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Pull the human readable message out of a Google API error body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn hits_from_items(items: Vec<SearchItem>, kind: MediaKind) -> Vec<SearchHit> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = match kind {
                MediaKind::Playlist => item.id.playlist_id,
                MediaKind::Video => item.id.video_id,
            }?;
            Some(SearchHit { id, kind })
        })
        .collect()
}

#[async_trait]
impl MediaSearch for YouTubeSearchClient {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, SearchError> {
        debug!(query = %query, kind = %kind, max_results, "Searching YouTube");

        let response = self
            .client
            .get(self.search_url(query, kind, max_results))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    // The request URL carries the API key.
                    SearchError::Transport(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body: SearchListResponse = response.json().await.map_err(|e| {
            SearchError::InvalidResponse(format!(
                "Failed to parse search response: {}",
                e.without_url()
            ))
        })?;

        Ok(hits_from_items(body.items, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_encoded_search_url() {
        let client = YouTubeSearchClient::new(
            "key/with+chars",
            "https://yt.example/v3/",
            Duration::from_secs(5),
        )
        .unwrap();

        let url = client.search_url("Telugu Melodies & more", MediaKind::Playlist, 1);

        assert_eq!(
            url,
            "https://yt.example/v3/search?part=snippet&q=Telugu%20Melodies%20%26%20more&type=playlist&maxResults=1&key=key%2Fwith%2Bchars"
        );
    }

    #[test]
    fn parses_playlist_and_video_ids() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [
                {"id": {"kind": "youtube#playlist", "playlistId": "PLxyz"}},
                {"id": {"kind": "youtube#video", "videoId": "vid1"}}
            ]
        }"#;
        let parsed: SearchListResponse = serde_json::from_str(body).unwrap();
        let hits = hits_from_items(parsed.items, MediaKind::Playlist);
        assert_eq!(
            hits,
            vec![SearchHit {
                id: "PLxyz".to_string(),
                kind: MediaKind::Playlist
            }]
        );

        let parsed: SearchListResponse = serde_json::from_str(body).unwrap();
        let hits = hits_from_items(parsed.items, MediaKind::Video);
        assert_eq!(hits[0].id, "vid1");
    }

    #[test]
    fn missing_items_means_no_hits() {
        let parsed: SearchListResponse =
            serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(hits_from_items(parsed.items, MediaKind::Video).is_empty());
    }

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "errors": []}}"#;
        assert_eq!(
            api_error_message(body),
            "API key not valid. Please pass a valid API key."
        );
        assert_eq!(api_error_message(" Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn failure_reason_does_not_expose_api_key() {
        use crate::media::{MediaResolver, Resolution, ThemeResolver};
        use std::sync::Arc;

        let client = YouTubeSearchClient::new(
            "SECRET-YT-KEY-123",
            "http://127.0.0.1:1/v3",
            Duration::from_secs(5),
        )
        .unwrap();
        let resolver = MediaResolver::new(Arc::new(client));

        match resolver.resolve("Calm Piano").await {
            Resolution::Failed(reason) => {
                assert!(reason.starts_with("Connection error"));
                assert!(!reason.contains("SECRET-YT-KEY-123"));
                assert!(!reason.contains("key="));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }
}
