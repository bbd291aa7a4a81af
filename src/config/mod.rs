mod file_config;

pub use file_config::{FileConfig, LlmFileConfig, SearchFileConfig, SpeechFileConfig};

use crate::llm::{CompletionOptions, GEMINI_API_BASE, OPENAI_API_BASE};
use crate::media::YOUTUBE_API_BASE;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::speech::TRANSLATE_TTS_URL;
use crate::turn::TurnOptions;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub audio_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub audio_dir: PathBuf,

    // Collaborators
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub speech: SpeechSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Gemini,
    OpenAI,
}

impl LlmProviderKind {
    fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            other => bail!("Unknown LLM provider '{}', expected 'gemini' or 'openai'", other),
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::OpenAI => DEFAULT_OPENAI_MODEL,
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_API_BASE,
            Self::OpenAI => OPENAI_API_BASE,
        }
    }

    fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Settings for the reply generation backend.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

/// Settings for the media search backend.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Settings for the speech engine.
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub language: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            base_url: TRANSLATE_TTS_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    ///
    /// API keys come from the file or from the environment and are required.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        Self::resolve_with_env(cli, file_config, |name| std::env::var(name).ok())
    }

    fn resolve_with_env(
        cli: &CliConfig,
        file_config: Option<FileConfig>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port {
            bail!("port and metrics_port must differ (both are {})", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let audio_dir = file
            .audio_dir
            .map(PathBuf::from)
            .or_else(|| cli.audio_dir.clone())
            .unwrap_or_else(|| PathBuf::from("audio"));

        let llm_file = file.llm.unwrap_or_default();
        let provider = match llm_file.provider.as_deref() {
            Some(name) => LlmProviderKind::parse(name)?,
            None => LlmProviderKind::Gemini,
        };
        let llm = LlmSettings {
            provider,
            base_url: llm_file
                .base_url
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            model: llm_file
                .model
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key: resolve_credential(
                "LLM API key",
                llm_file.api_key,
                llm_file
                    .api_key_env
                    .as_deref()
                    .unwrap_or(provider.default_api_key_env()),
                &env,
            )?,
            temperature: llm_file.temperature.unwrap_or(0.7),
            timeout_secs: llm_file.timeout_sec.unwrap_or(60),
        };

        let search_file = file.search.unwrap_or_default();
        let search = SearchSettings {
            base_url: search_file
                .base_url
                .unwrap_or_else(|| YOUTUBE_API_BASE.to_string()),
            api_key: resolve_credential(
                "YouTube API key",
                search_file.api_key,
                search_file
                    .api_key_env
                    .as_deref()
                    .unwrap_or("YOUTUBE_API_KEY"),
                &env,
            )?,
            timeout_secs: search_file.timeout_sec.unwrap_or(15),
        };

        let speech_file = file.speech.unwrap_or_default();
        let speech_defaults = SpeechSettings::default();
        let speech = SpeechSettings {
            language: speech_file.language.unwrap_or(speech_defaults.language),
            base_url: speech_file.base_url.unwrap_or(speech_defaults.base_url),
            timeout_secs: speech_file
                .timeout_sec
                .unwrap_or(speech_defaults.timeout_secs),
        };

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            audio_dir,
            llm,
            search,
            speech,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            frontend_dir_path: self.frontend_dir_path.clone(),
            audio_dir: self.audio_dir.clone(),
        }
    }

    pub fn turn_options(&self) -> TurnOptions {
        TurnOptions {
            completion: CompletionOptions {
                temperature: self.llm.temperature,
                max_tokens: None,
                timeout: Duration::from_secs(self.llm.timeout_secs),
            },
            narration_language: self.speech.language.clone(),
        }
    }
}

/// Pick the inline key if set, otherwise read it from `env_var`.
fn resolve_credential(
    what: &str,
    inline: Option<String>,
    env_var: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    let key = inline
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env(env_var).filter(|k| !k.trim().is_empty()));
    match key {
        Some(key) => Ok(key),
        None => bail!(
            "Missing {}: set api_key in the config file or the {} environment variable",
            what,
            env_var
        ),
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
