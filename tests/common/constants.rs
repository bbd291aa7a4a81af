//! Shared constants for end-to-end tests

// ============================================================================
// Server Lifecycle
// ============================================================================

/// How long to wait for a spawned server to answer
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness probes
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

// ============================================================================
// Canned Replies
// ============================================================================

/// A reply shaped the way the model is asked to answer
pub const STRUCTURED_REPLY: &str = "Take a slow breath, you are doing fine.\n\
Drink some water and stretch.\n\
- 😊 Relaxing Telugu Beats!!\n\
– Hindi Sufi Evenings\n\
• English Rainy Day Acoustic\n\
Visit https://example.com/self-care for more 🎶";

/// Playlist id served for "Relaxing Telugu Beats"
pub const TELUGU_PLAYLIST_ID: &str = "PLtelugu001";

/// Video id served for "Hindi Sufi Evenings" (no playlist exists)
pub const HINDI_VIDEO_ID: &str = "vidSufi42";
