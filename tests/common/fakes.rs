//! Fake collaborators for end-to-end tests
//!
//! They stand in for the generative model, the media search backend and the
//! speech engine so tests never touch the network.

use async_trait::async_trait;
use moodtunes_server::llm::{
    CompletionOptions, CompletionResponse, FinishReason, LlmError, LlmProvider, Message,
};
use moodtunes_server::media::{MediaKind, MediaSearch, SearchError, SearchHit};
use moodtunes_server::reply::NarrationText;
use moodtunes_server::speech::{AudioArtifact, AudioStore, SpeechSynthesizer, SynthesisError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Replies with the same text to every prompt, or always fails.
pub struct ScriptedLlm {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .extend(messages.iter().map(|m| m.content.clone()));

        match &self.reply {
            Some(reply) => Ok(CompletionResponse {
                message: Message::assistant(reply.clone()),
                finish_reason: FinishReason::Stop,
                usage: None,
            }),
            None => Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded".to_string(),
            }),
        }
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        Ok(())
    }
}

/// In-memory catalog keyed by exact query text and kind.
#[derive(Default)]
pub struct CatalogSearch {
    items: HashMap<(String, MediaKind), String>,
    failing: Vec<String>,
    calls: Mutex<Vec<(String, MediaKind)>>,
}

impl CatalogSearch {
    pub fn with_playlist(mut self, query: &str, id: &str) -> Self {
        self.items
            .insert((query.to_string(), MediaKind::Playlist), id.to_string());
        self
    }

    pub fn with_video(mut self, query: &str, id: &str) -> Self {
        self.items
            .insert((query.to_string(), MediaKind::Video), id.to_string());
        self
    }

    /// Make searches for `query` fail with a transport error.
    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, MediaKind)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaSearch for CatalogSearch {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), kind));

        if self.failing.iter().any(|q| q == query) {
            return Err(SearchError::Transport("quota exhausted".to_string()));
        }

        Ok(self
            .items
            .get(&(query.to_string(), kind))
            .map(|id| SearchHit {
                id: id.clone(),
                kind,
            })
            .into_iter()
            .take(max_results as usize)
            .collect())
    }
}

/// Writes the narration text itself as the "audio" and remembers it.
pub struct RecordingSpeech {
    store: AudioStore,
    narrations: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn new(store: AudioStore) -> Self {
        Self {
            store,
            narrations: Mutex::new(Vec::new()),
        }
    }

    pub fn narrations(&self) -> Vec<String> {
        self.narrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeech {
    fn name(&self) -> &str {
        "recording"
    }

    async fn synthesize(
        &self,
        text: &NarrationText,
        _language: &str,
    ) -> Result<AudioArtifact, SynthesisError> {
        if text.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        self.narrations
            .lock()
            .unwrap()
            .push(text.as_str().to_string());
        Ok(self.store.persist(text.as_str().as_bytes()).await?)
    }
}
