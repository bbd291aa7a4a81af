//! Search backend trait definition.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Kind of media a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Playlist,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Playlist => "playlist",
            MediaKind::Video => "video",
        }
    }

    /// Public watch URL for an item of this kind.
    pub fn url_for(&self, id: &str) -> String {
        match self {
            MediaKind::Playlist => format!("https://www.youtube.com/playlist?list={}", id),
            MediaKind::Video => format!("https://www.youtube.com/watch?v={}", id),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub kind: MediaKind,
}

/// Errors that can occur when querying a search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for media search backends.
#[async_trait]
pub trait MediaSearch: Send + Sync {
    /// Get the backend's name (e.g., "youtube").
    fn name(&self) -> &str;

    /// Search for at most `max_results` items of the given kind.
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, SearchError>;
}
