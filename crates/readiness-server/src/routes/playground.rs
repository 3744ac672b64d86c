use axum::extract::State;
use axum::Json;
use readiness_core::chat::{self, ChatMessage};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ChatBody {
    pub message: String,
}

/// POST /api/playground/chat: canned assistant reply after a simulated
/// thinking delay.
pub async fn chat(
    State(app): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::bad_request("message is required"));
    }
    let delay = {
        let cfg = &app.config.playground;
        chat::simulated_delay(&mut rand::thread_rng(), cfg.min_delay_ms, cfg.max_delay_ms)
    };
    tokio::time::sleep(delay).await;

    let reply = ChatMessage::assistant(chat::reply_for(&body.message));
    Ok(Json(serde_json::json!({
        "reply": reply,
        "delay_ms": delay.as_millis() as u64,
    })))
}
