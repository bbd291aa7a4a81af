//! LLM provider abstraction layer.
//!
//! This module provides a trait-based abstraction for LLM providers,
//! so the reply pipeline can work with different backends (Gemini, OpenAI, etc.).

mod gemini;
mod openai;
mod provider;
mod types;

pub use gemini::{GeminiProvider, GEMINI_API_BASE};
pub use openai::{OpenAIProvider, OPENAI_API_BASE};
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};
