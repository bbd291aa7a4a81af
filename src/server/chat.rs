//! The `/chat` endpoint: one mood in, one enriched reply and its narration out.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::state::{GuardedOrchestrator, ServerState};
use crate::turn::TurnError;

/// Path prefix synthesized audio is served under.
pub const AUDIO_ROUTE: &str = "/audio";

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub reply: String,
    pub audio: String,
}

impl IntoResponse for TurnError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

async fn post_chat(
    State(orchestrator): State<GuardedOrchestrator>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, TurnError> {
    let outcome = orchestrator.run_turn(&request.message).await?;

    Ok(Json(ChatResponse {
        audio: format!("{}/{}", AUDIO_ROUTE, outcome.audio.generated_name),
        reply: outcome.reply.into_text(),
    }))
}

pub fn make_chat_routes(state: ServerState) -> Router {
    Router::new()
        .route("/chat", post(post_chat))
        .with_state(state)
}
