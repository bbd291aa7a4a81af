//! Speech synthesis through the Google Translate TTS endpoint.
//!
//! The endpoint only accepts short inputs, so the narration is split into
//! chunks on word boundaries and the returned MP3 segments are concatenated.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::store::{AudioArtifact, AudioStore};
use super::{SpeechSynthesizer, SynthesisError};
use crate::reply::NarrationText;
use crate::server::metrics;

pub const TRANSLATE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Longest text the endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

pub struct TranslateTtsSynthesizer {
    client: Client,
    endpoint: String,
    store: AudioStore,
}

impl TranslateTtsSynthesizer {
    pub fn new(endpoint: impl Into<String>, store: AudioStore, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            store,
        })
    }

    fn chunk_url(&self, chunk: &str, language: &str, idx: usize, total: usize) -> String {
        format!(
            "{}?ie=UTF-8&q={}&tl={}&client=tw-ob&total={}&idx={}&textlen={}",
            self.endpoint,
            urlencoding::encode(chunk),
            urlencoding::encode(language),
            total,
            idx,
            chunk.chars().count()
        )
    }

    async fn fetch_chunk(&self, url: &str) -> Result<Vec<u8>, SynthesisError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SynthesisError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Transport(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Breaks between words; a single word longer than `max_chars` is cut.
/// A limit of zero is treated as one.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl SpeechSynthesizer for TranslateTtsSynthesizer {
    fn name(&self) -> &str {
        "translate-tts"
    }

    async fn synthesize(
        &self,
        text: &NarrationText,
        language: &str,
    ) -> Result<AudioArtifact, SynthesisError> {
        if text.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let chunks = split_into_chunks(text.as_str(), MAX_CHUNK_CHARS);
        debug!(
            chunks = chunks.len(),
            language = %language,
            "Synthesizing narration"
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let url = self.chunk_url(chunk, language, idx, chunks.len());
            audio.extend(self.fetch_chunk(&url).await?);
        }

        metrics::record_synthesized_audio(audio.len());
        Ok(self.store.persist(&audio).await?)
    }
}
