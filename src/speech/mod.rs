//! Speech synthesis of narration text.

mod store;
mod translate_tts;

pub use store::{AudioArtifact, AudioStore};
pub use translate_tts::{
    split_into_chunks, TranslateTtsSynthesizer, MAX_CHUNK_CHARS, TRANSLATE_TTS_URL,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::reply::NarrationText;

/// Errors that can occur while synthesizing speech.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Nothing to narrate")]
    EmptyText,

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("TTS error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to store audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for speech synthesis engines.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Get the engine's name.
    fn name(&self) -> &str;

    /// Synthesize `text` in the given language and persist the audio.
    ///
    /// # Arguments
    /// * `text` - Sanitized narration.
    /// * `language` - Language code understood by the engine (e.g., "en").
    async fn synthesize(
        &self,
        text: &NarrationText,
        language: &str,
    ) -> Result<AudioArtifact, SynthesisError>;
}
