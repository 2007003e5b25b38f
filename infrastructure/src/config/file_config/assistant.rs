//! Assistant configuration from TOML (`[assistant]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "xiaomi/mimo-v2-flash:free";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Raw assistant configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// OpenAI-compatible chat completions URL
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Upper bound on reply length
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Timeout in seconds for a single request
    pub timeout_seconds: Option<u64>,
    /// Only the most recent messages are sent when set
    pub max_history: Option<usize>,
    /// `HTTP-Referer` header value
    pub referer: Option<String>,
    /// `X-Title` header value
    pub title: Option<String>,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_seconds: Some(60),
            max_history: None,
            referer: Some("https://sonpo-gpt.vercel.app".to_string()),
            title: Some("SonpoGPT".to_string()),
        }
    }
}

impl FileAssistantConfig {
    /// Resolve the API key: explicit key first, then the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}
