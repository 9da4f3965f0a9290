//! Chat module — conversation model shared by the endpoint and the widget.
//!
//! # Public API
//!
//! - [`ChatMessage`] / [`Role`] — one turn of a conversation
//! - [`ChatRequest`] / [`ChatResponse`] — `POST /api/chat` wire bodies
//! - [`exchange::ChatService`] — server-side request handling
//! - [`widget::ChatSession`] / [`widget::ChatWidget`] — client-side state
//! - [`transport::HttpTransport`] — widget → endpoint HTTP transport

pub mod exchange;
pub mod transport;
pub mod widget;

use serde::{Deserialize, Serialize};

/// Number of prior turns forwarded to the provider.
pub const HISTORY_WINDOW: usize = 6;

/// Reply sent when the provider call fails for any reason.
pub const APOLOGY: &str = "Sorry, I'm having trouble right now. Please try again later.";

/// Reply sent when the provider succeeds without any completion text.
pub const NO_COMPLETION: &str = "Sorry, I couldn't generate a response.";

/// Message the widget shows when it cannot reach the endpoint.
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting. Please make sure the API is set up correctly.";

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation turns in chronological order.
pub type ChatHistory = Vec<ChatMessage>;

/// Body of `POST /api/chat`.
///
/// `history` holds the turns *before* `message`; the endpoint appends
/// `message` itself as the final user turn.
///
/// Every history entry must carry a `user` or `assistant` role. A request with
/// any other role (`system`, `tool`, ...) fails to deserialize as a whole; it
/// is not relabelled as `assistant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: ChatHistory,
}

/// Body returned by `POST /api/chat`, on success and on failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// The most recent [`HISTORY_WINDOW`] turns of `history`, oldest first.
pub fn window(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}
