//! MoodTunes Server Library
//!
//! Turns a free-text mood into a motivational reply whose playlist themes are
//! linked to real media, plus a narrated audio rendition of that reply.
//! The modules are exposed for the binary, for testing and potential reuse.

pub mod config;
pub mod llm;
pub mod media;
pub mod reply;
pub mod server;
pub mod speech;
pub mod turn;

// Re-export commonly used types for convenience
pub use media::{MediaResolver, MediaSearch, Resolution};
pub use reply::{EnrichedReply, LineEnricher, NarrationText};
pub use server::{run_server, RequestsLoggingLevel};
pub use speech::{AudioStore, SpeechSynthesizer};
pub use turn::{PipelineContext, TurnError, TurnOptions, TurnOrchestrator};
