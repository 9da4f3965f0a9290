//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use folio_core::chat::exchange::ReplyStatus;
use folio_core::chat::{ChatRequest, ChatResponse};
use tracing::{error, info};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `POST /api/chat` — answer one message in the persona's voice.
///
/// Returns `200 {response}` on success (including the no-credential
/// fallback) and `500 {response}` with a static apology otherwise.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = body.map_err(|e| {
        error!(error = %e.body_text(), "rejected chat request body");
        AppError::from(e)
    })?;

    info!(
        message_len = request.message.len(),
        history_len = request.history.len(),
        "chat request"
    );

    let reply = state.chat.reply(&request).await;
    match reply.status {
        ReplyStatus::Ok => Ok(Json(reply.into_response())),
        ReplyStatus::Failed => Err(AppError::Upstream),
    }
}
