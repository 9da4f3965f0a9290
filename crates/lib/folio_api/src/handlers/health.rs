//! Health endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

/// Response body for `GET /api/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"` when a provider credential is set, `"degraded"` when chat is
    /// answering with the persona's fallback reply.
    pub status: &'static str,
    pub version: &'static str,
    pub persona: String,
    pub provider_configured: bool,
    pub model: String,
}

/// `GET /api/health`: reports whether chat replies come from the provider.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_configured = state.chat.provider_configured();
    Json(HealthResponse {
        status: if provider_configured { "ok" } else { "degraded" },
        version: folio_core::VERSION,
        persona: state.chat.persona().name.clone(),
        provider_configured,
        model: state.chat.config().model.clone(),
    })
}
