//! Media lookup for playlist themes.
//!
//! [`MediaSearch`] abstracts the search backend, [`MediaResolver`] applies the
//! playlist-then-video fallback on top of it.

mod resolver;
mod search;
mod youtube;

pub use resolver::{
    MediaReference, MediaResolver, Resolution, ResolutionStatus, ThemeResolver,
    MAX_RESULTS_PER_TIER,
};
pub use search::{MediaKind, MediaSearch, SearchError, SearchHit};
pub use youtube::{YouTubeSearchClient, YOUTUBE_API_BASE};
