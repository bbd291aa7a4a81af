//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own audio directory and its own
//! fake collaborators.

use super::constants::*;
use super::fakes::{CatalogSearch, RecordingSpeech, ScriptedLlm};
use moodtunes_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use moodtunes_server::speech::AudioStore;
use moodtunes_server::turn::{PipelineContext, TurnOptions};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance wired to fake collaborators
///
/// When dropped, the server shuts down and the audio directory is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    pub llm: Arc<ScriptedLlm>,
    pub search: Arc<CatalogSearch>,
    pub speech: Arc<RecordingSpeech>,

    // Private fields - keep resources alive until drop
    _temp_audio_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be built, bound or doesn't become ready.
    pub async fn spawn(llm: ScriptedLlm, search: CatalogSearch) -> Self {
        let temp_audio_dir = TempDir::new().expect("Failed to create audio dir");
        let store = AudioStore::new(temp_audio_dir.path()).expect("Failed to open audio store");

        let llm = Arc::new(llm);
        let search = Arc::new(search);
        let speech = Arc::new(RecordingSpeech::new(store));

        let context = PipelineContext {
            llm: llm.clone(),
            search: search.clone(),
            speech: speech.clone(),
        };

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            audio_dir: temp_audio_dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let app = make_app(config, context, TurnOptions::default()).expect("Failed to build app");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            llm,
            search,
            speech,
            _temp_audio_dir: temp_audio_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the status endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }

    pub async fn chat(&self, message: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/chat", self.base_url))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .expect("Failed to send chat request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(format!("{}{}", self.base_url, path))
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
