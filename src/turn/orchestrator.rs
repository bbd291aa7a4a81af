use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info};

use super::prompt::build_mood_prompt;
use crate::llm::{CompletionOptions, LlmError, LlmProvider, Message};
use crate::media::{MediaResolver, MediaSearch, ResolutionStatus};
use crate::reply::{EnrichedReply, LineEnricher, NarrationText};
use crate::server::metrics;
use crate::speech::{AudioArtifact, SpeechSynthesizer, SynthesisError};

/// Collaborators a turn talks to.
///
/// Built once by the hosting service and handed to the orchestrator, which
/// never creates or tears down clients itself.
#[derive(Clone)]
pub struct PipelineContext {
    pub llm: Arc<dyn LlmProvider>,
    pub search: Arc<dyn MediaSearch>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

#[derive(Debug, Clone)]
pub struct TurnOptions {
    pub completion: CompletionOptions,
    /// Language code passed to the speech engine.
    pub narration_language: String,
}

impl Default for TurnOptions {
    fn default() -> Self {
        Self {
            completion: CompletionOptions::default(),
            narration_language: "en".to_string(),
        }
    }
}

/// Failures that abort a turn.
///
/// Media lookups are not in here: they degrade to inline diagnostics.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("Reply generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl TurnError {
    fn metric_label(&self) -> &'static str {
        match self {
            TurnError::Generation(_) => "generation_failed",
            TurnError::Synthesis(_) => "synthesis_failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: EnrichedReply,
    pub narration: NarrationText,
    pub audio: AudioArtifact,
}

pub struct TurnOrchestrator {
    llm: Arc<dyn LlmProvider>,
    speech: Arc<dyn SpeechSynthesizer>,
    enricher: LineEnricher,
    options: TurnOptions,
}

impl TurnOrchestrator {
    pub fn new(context: PipelineContext, options: TurnOptions) -> Self {
        let resolver = Arc::new(MediaResolver::new(context.search));
        Self {
            llm: context.llm,
            speech: context.speech,
            enricher: LineEnricher::new(resolver),
            options,
        }
    }

    /// Run one turn for `mood`.
    ///
    /// Each collaborator is called at most once per step, without retries.
    pub async fn run_turn(&self, mood: &str) -> Result<TurnOutcome, TurnError> {
        let start = Instant::now();
        let result = self.run(mood).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => {
                error!(error = %err, "Turn failed");
                err.metric_label()
            }
        };
        metrics::record_turn(outcome, start.elapsed());

        result
    }

    async fn run(&self, mood: &str) -> Result<TurnOutcome, TurnError> {
        let prompt = build_mood_prompt(mood);
        let completion = self
            .llm
            .complete(&[Message::user(prompt)], &self.options.completion)
            .await?;

        let reply = self.enricher.enrich(completion.message.content.trim()).await;
        let narration = NarrationText::from_enriched(&reply);

        let audio = self
            .speech
            .synthesize(&narration, &self.options.narration_language)
            .await?;

        let failed_themes = reply
            .themes()
            .iter()
            .filter(|t| t.resolution.status() == ResolutionStatus::Failed)
            .count();
        info!(
            provider = self.llm.name(),
            model = self.llm.model(),
            themes = reply.themes().len(),
            failed_themes,
            audio = %audio.generated_name,
            "Turn completed"
        );

        Ok(TurnOutcome {
            reply,
            narration,
            audio,
        })
    }
}
