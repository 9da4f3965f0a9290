//! Provider module — hosted chat-completion backends.
//!
//! The chat service talks to providers through [`CompletionProvider`] so the
//! outbound HTTP call can be swapped for a stub in tests.
//!
//! # Providers
//!
//! - [`groq::GroqProvider`] — any OpenAI-compatible `/chat/completions` API
//!   (Groq by default)

pub mod config;
pub mod groq;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::chat::ChatMessage;

/// Errors that can occur while calling a completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider response parse error: {0}")]
    Decode(String),

    #[error("Invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Role of an outbound message, including the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message in an outbound completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for PromptMessage {
    fn from(msg: &ChatMessage) -> Self {
        let role = match msg.role {
            crate::chat::Role::User => PromptRole::User,
            crate::chat::Role::Assistant => PromptRole::Assistant,
        };
        Self {
            role,
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A hosted chat-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion.
    ///
    /// Returns `Ok(None)` when the provider answered successfully but the
    /// response carried no completion text.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, ProviderError>;
}

/// Where the provider credential comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Read the named environment variable on every call.
    Env(String),
    /// A fixed value (tests and embedding).
    Fixed(Option<String>),
}

impl ApiKeySource {
    /// Current credential, or `None` when unset or blank.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok(),
            ApiKeySource::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}
