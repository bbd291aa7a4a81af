//! One mood-to-reply turn: generate, enrich, sanitize, narrate.

mod orchestrator;
mod prompt;

pub use orchestrator::{PipelineContext, TurnError, TurnOptions, TurnOrchestrator, TurnOutcome};
pub use prompt::{build_mood_prompt, THEMES_PER_LANGUAGE, THEME_LANGUAGES, TIPS_PER_REPLY};
