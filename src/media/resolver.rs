//! Playlist-then-video resolution of theme queries.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::search::{MediaKind, MediaSearch};
use crate::server::metrics;

/// Each tier asks for a single item.
pub const MAX_RESULTS_PER_TIER: u32 = 1;

const FALLBACK_ORDER: [MediaKind; 2] = [MediaKind::Playlist, MediaKind::Video];

/// A resolved link to a media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaReference {
    pub url: String,
    pub kind: MediaKind,
}

/// Outcome of resolving one theme query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(MediaReference),
    /// Both tiers answered, neither had a match.
    Unavailable,
    /// The search backend failed; carries the cause.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Resolved,
    Unavailable,
    Failed,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::Unavailable => "unavailable",
            ResolutionStatus::Failed => "failed",
        }
    }
}

impl Resolution {
    pub fn status(&self) -> ResolutionStatus {
        match self {
            Resolution::Resolved(_) => ResolutionStatus::Resolved,
            Resolution::Unavailable => ResolutionStatus::Unavailable,
            Resolution::Failed(_) => ResolutionStatus::Failed,
        }
    }

    pub fn reference(&self) -> Option<&MediaReference> {
        match self {
            Resolution::Resolved(reference) => Some(reference),
            _ => None,
        }
    }
}

/// Anything able to turn a theme query into a [`Resolution`].
///
/// Implementations must not fail: errors are reported as [`Resolution::Failed`].
#[async_trait]
pub trait ThemeResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Resolution;
}

/// Resolves queries against a [`MediaSearch`] backend.
///
/// Tries playlists first and falls back to videos. Each tier is attempted at
/// most once, and a backend failure at any tier ends the resolution.
pub struct MediaResolver {
    search: Arc<dyn MediaSearch>,
}

impl MediaResolver {
    pub fn new(search: Arc<dyn MediaSearch>) -> Self {
        Self { search }
    }

    async fn lookup(&self, query: &str) -> Resolution {
        if query.trim().is_empty() {
            return Resolution::Unavailable;
        }

        for kind in FALLBACK_ORDER {
            match self.search.search(query, kind, MAX_RESULTS_PER_TIER).await {
                Ok(hits) => {
                    if let Some(hit) = hits.into_iter().next() {
                        debug!(query = %query, kind = %kind, id = %hit.id, "Resolved theme");
                        return Resolution::Resolved(MediaReference {
                            url: kind.url_for(&hit.id),
                            kind,
                        });
                    }
                    debug!(query = %query, kind = %kind, "No match, trying next tier");
                }
                Err(err) => {
                    warn!(
                        query = %query,
                        kind = %kind,
                        backend = self.search.name(),
                        error = %err,
                        "Media search failed"
                    );
                    return Resolution::Failed(err.to_string());
                }
            }
        }

        Resolution::Unavailable
    }
}

#[async_trait]
impl ThemeResolver for MediaResolver {
    async fn resolve(&self, query: &str) -> Resolution {
        let resolution = self.lookup(query).await;
        metrics::record_media_resolution(resolution.status().as_str());
        resolution
    }
}
