//! Groq chat-completion provider.
//!
//! Calls an OpenAI-compatible `/chat/completions` endpoint once per request.
//! No retries: a failed call is reported to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::config::ProviderConfig;
use super::{CompletionProvider, CompletionRequest, ProviderError};

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible completion client.
#[derive(Debug, Clone)]
pub struct GroqProvider {
    client: Client,
    endpoint: Url,
}

impl GroqProvider {
    /// Build a provider for `config.base_url`.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Transport(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url)?,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> Result<Url, ProviderError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Ok(Url::parse(&base)?.join("chat/completions")?)
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, ProviderError> {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ProviderError::Status { status, body });
        }

        let data: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }
}
