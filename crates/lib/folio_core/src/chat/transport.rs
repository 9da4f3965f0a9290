//! Widget → endpoint transport.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::{ChatRequest, ChatResponse};

/// Path of the chat endpoint relative to the server root.
pub const CHAT_PATH: &str = "api/chat";

/// Errors the widget can hit while reaching the chat endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint returned status {0}")]
    Status(u16),

    #[error("Endpoint response parse error: {0}")]
    Decode(String),

    #[error("Request was abandoned before a reply arrived")]
    Interrupted,
}

/// Sends a chat request to wherever the endpoint lives.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver `request` and return the assistant's reply text.
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError>;
}

/// JSON-over-HTTP transport for `POST /api/chat`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// `server` is the root URL of a running chat server, e.g. `http://127.0.0.1:3100`.
    pub fn new(server: &str) -> Result<Self, TransportError> {
        let root = Url::parse(&format!("{}/", server.trim_end_matches('/')))?;
        Ok(Self {
            client: Client::new(),
            url: root.join(CHAT_PATH)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status().as_u16()));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(body.response)
    }
}
