//! Application error types.
//!
//! Every error renders the same body shape as a successful reply,
//! `{"response": "..."}`, carrying a static apology. Internal details stay in
//! the server log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::chat::{APOLOGY, ChatResponse};
use thiserror::Error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Upstream provider failed")]
    Upstream,

    #[error("Internal server error")]
    Internal(String),
}

/// The response every failure collapses to.
pub fn apology_response() -> Response {
    let body = Json(ChatResponse {
        response: APOLOGY.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        apology_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(e: axum::extract::rejection::JsonRejection) -> Self {
        AppError::MalformedRequest(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_500() {
        for err in [
            AppError::MalformedRequest("bad".into()),
            AppError::Upstream,
            AppError::Internal("boom".into()),
        ] {
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
