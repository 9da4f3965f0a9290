//! # folio_api
//!
//! HTTP API library for Folio.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::any::Any;

use axum::Router;
use axum::response::Response;
use axum::routing::{get, post};
use folio_core::chat::exchange::ChatService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::error;

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat exchange logic, including the persona and provider.
    pub chat: ChatService,
    /// API configuration.
    pub config: ApiConfig,
}

fn panic_to_apology(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "handler panicked");
    error::apology_response()
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(CatchPanicLayer::custom(panic_to_apology))
        .layer(cors)
        .with_state(state)
}
