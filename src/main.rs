use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodtunes_server::config::{self, AppConfig, FileConfig, LlmProviderKind};
use moodtunes_server::llm::{GeminiProvider, LlmProvider, OpenAIProvider};
use moodtunes_server::media::YouTubeSearchClient;
use moodtunes_server::server::{metrics, run_server, RequestsLoggingLevel};
use moodtunes_server::speech::{AudioStore, TranslateTtsSynthesizer};
use moodtunes_server::turn::PipelineContext;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9092)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Directory where narrated replies are stored. Created if missing.
    #[clap(long, value_parser = parse_path)]
    pub audio_dir: Option<PathBuf>,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            audio_dir: args.audio_dir.clone(),
        }
    }
}

fn make_llm_provider(config: &AppConfig) -> Arc<dyn LlmProvider> {
    let llm = &config.llm;
    match llm.provider {
        LlmProviderKind::Gemini => Arc::new(GeminiProvider::new(
            llm.base_url.clone(),
            llm.model.clone(),
            llm.api_key.clone(),
        )),
        LlmProviderKind::OpenAI => Arc::new(OpenAIProvider::new(
            llm.base_url.clone(),
            llm.model.clone(),
            Some(llm.api_key.clone()),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&config::CliConfig::from(&cli_args), file_config)?;

    let llm = make_llm_provider(&app_config);
    info!(
        "Using {} model {} for replies",
        llm.name(),
        llm.model()
    );
    if let Err(err) = llm.health_check().await {
        warn!("LLM health check failed, continuing anyway: {}", err);
    }

    let search = YouTubeSearchClient::new(
        app_config.search.api_key.clone(),
        app_config.search.base_url.clone(),
        Duration::from_secs(app_config.search.timeout_secs),
    )
    .context("Failed to create media search client")?;

    let audio_store = AudioStore::new(&app_config.audio_dir)?;
    info!("Storing narrated replies in {:?}", audio_store.dir());
    let speech = TranslateTtsSynthesizer::new(
        app_config.speech.base_url.clone(),
        audio_store,
        Duration::from_secs(app_config.speech.timeout_secs),
    )
    .context("Failed to create speech synthesizer")?;

    let context = PipelineContext {
        llm,
        search: Arc::new(search),
        speech: Arc::new(speech),
    };

    info!("Initializing metrics...");
    metrics::init_metrics();

    run_server(app_config.server_config(), context, app_config.turn_options()).await
}
