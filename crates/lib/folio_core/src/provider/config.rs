//! Provider configuration resolution.
//!
//! Built-in defaults target Groq's OpenAI-compatible API; a few environment
//! variables override them. The credential itself is not stored here, only
//! the name of the variable it is read from at request time.

use std::env;

use super::ApiKeySource;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Resolved settings for the outbound completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Environment variable holding the bearer credential.
    pub api_key_env: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// Reads overrides from environment variables.
    ///
    /// | Variable        | Default                            |
    /// |-----------------|------------------------------------|
    /// | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1`   |
    /// | `GROQ_MODEL`    | `llama-3.1-8b-instant`             |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("GROQ_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("GROQ_MODEL").unwrap_or(defaults.model),
            ..defaults
        }
    }

    /// Credential source for this configuration.
    pub fn key_source(&self) -> ApiKeySource {
        ApiKeySource::Env(self.api_key_env.clone())
    }
}
