//! Chat exchange — one stateless request/response round through the provider.
//!
//! [`ChatService::reply`] never fails: every provider problem collapses into
//! [`ReplyStatus::Failed`] with the static [`APOLOGY`] text, and the details
//! go to the log only.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::{APOLOGY, ChatMessage, ChatRequest, ChatResponse, NO_COMPLETION, window};
use crate::persona::Persona;
use crate::provider::config::ProviderConfig;
use crate::provider::{ApiKeySource, CompletionProvider, CompletionRequest, PromptMessage};

/// Outcome class of a reply, mapped to an HTTP status by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    Failed,
}

/// Result of one chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub status: ReplyStatus,
    pub response: String,
}

impl ChatReply {
    fn ok(response: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Ok,
            response: response.into(),
        }
    }

    /// The generic apology returned for any failure.
    pub fn failed() -> Self {
        Self {
            status: ReplyStatus::Failed,
            response: APOLOGY.to_string(),
        }
    }

    /// Wire body for this reply.
    pub fn into_response(self) -> ChatResponse {
        ChatResponse {
            response: self.response,
        }
    }
}

/// Server-side chat handler logic.
#[derive(Clone)]
pub struct ChatService {
    persona: Arc<Persona>,
    config: ProviderConfig,
    key_source: ApiKeySource,
    provider: Arc<dyn CompletionProvider>,
}

impl ChatService {
    pub fn new(
        persona: Persona,
        config: ProviderConfig,
        key_source: ApiKeySource,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            persona: Arc::new(persona),
            config,
            key_source,
            provider,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Whether a provider credential is currently available.
    pub fn provider_configured(&self) -> bool {
        self.key_source.resolve().is_some()
    }

    /// Assemble the outbound completion request for `message` and `history`.
    ///
    /// Order: system prompt, the last [`super::HISTORY_WINDOW`] history turns,
    /// then `message` as the final user turn.
    pub fn build_request(&self, message: &str, history: &[ChatMessage]) -> CompletionRequest {
        let recent = window(history);
        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(PromptMessage::system(self.persona.system_prompt.as_str()));
        messages.extend(recent.iter().map(PromptMessage::from));
        messages.push(PromptMessage::user(message));

        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Handle one chat request.
    pub async fn reply(&self, request: &ChatRequest) -> ChatReply {
        let Some(api_key) = self.key_source.resolve() else {
            info!("no provider credential configured, returning fallback reply");
            return ChatReply::ok(self.persona.fallback_reply.as_str());
        };

        let outbound = self.build_request(&request.message, &request.history);
        debug!(
            history_len = request.history.len(),
            forwarded = outbound.messages.len(),
            "forwarding chat to provider"
        );

        match self.provider.complete(&api_key, &outbound).await {
            Ok(Some(content)) if !content.is_empty() => ChatReply::ok(content),
            Ok(_) => {
                info!("provider returned no completion text");
                ChatReply::ok(NO_COMPLETION)
            }
            Err(e) => {
                error!(error = %e, "provider call failed");
                ChatReply::failed()
            }
        }
    }
}
