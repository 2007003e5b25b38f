//! OpenAI-compatible chat completions client

use crate::config::FileAssistantConfig;
use aftersale_application::ports::completion_gateway::{
    CompletionGateway, CompletionRequest, GatewayError,
};
use aftersale_domain::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`OpenRouterGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRouterSettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key: Option<String>,
    /// Name of the env var the key was expected in, for error messages
    pub api_key_env: String,
    pub timeout: Option<Duration>,
    pub referer: Option<String>,
    pub title: Option<String>,
}

impl OpenRouterSettings {
    pub fn from_config(config: &FileAssistantConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
            referer: config.referer.clone(),
            title: config.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Gateway that posts the transcript to a chat completions endpoint
pub struct OpenRouterGateway {
    client: Client,
    settings: OpenRouterSettings,
}

impl OpenRouterGateway {
    pub fn new(settings: OpenRouterSettings) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| {
                GatewayError::ConnectionError(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client, settings })
    }

    fn body<'a>(&'a self, messages: &'a [Message]) -> ChatRequestBody<'a> {
        ChatRequestBody {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
        }
    }

    fn extract_reply(body: ChatResponseBody) -> Result<String, GatewayError> {
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| GatewayError::InvalidResponse("reply has no message content".into()))
    }
}

#[async_trait]
impl CompletionGateway for OpenRouterGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured(self.settings.api_key_env.clone()))?;

        let messages = request.messages();
        debug!(
            model = %self.settings.model,
            messages = messages.len(),
            "Posting chat completion"
        );

        let mut http = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&self.body(&messages));
        if let Some(referer) = &self.settings.referer {
            http = http.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.settings.title {
            http = http.header("X-Title", title);
        }

        let response = http.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!("Completion endpoint returned {}", status);
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Self::extract_reply(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftersale_domain::{AnswerSet, ChatContext, ScenarioId};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn settings(endpoint: &str, api_key: Option<&str>) -> OpenRouterSettings {
        OpenRouterSettings {
            endpoint: endpoint.to_string(),
            model: "test/model".to_string(),
            max_tokens: 1000,
            api_key: api_key.map(str::to_string),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            timeout: Some(Duration::from_secs(5)),
            referer: Some("https://example.test".to_string()),
            title: Some("Aftersale".to_string()),
        }
    }

    fn request() -> CompletionRequest {
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        CompletionRequest::new(
            vec![Message::user("Should I cancel my insurance?")],
            Some(ChatContext::seller(Some(ScenarioId::B), answers)),
        )
    }

    /// Serve one HTTP response and hand back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/chat/completions", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_body_carries_system_prompt_and_limits() {
        let gateway = OpenRouterGateway::new(settings("http://localhost", Some("k"))).unwrap();
        let messages = request().messages();
        let body = serde_json::to_value(gateway.body(&messages)).unwrap();

        assert_eq!(body["model"], "test/model");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Should I cancel my insurance?");
    }

    #[test]
    fn test_extract_reply() {
        let body: ChatResponseBody = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Suspend it.  "}}]}"#,
        )
        .unwrap();
        assert_eq!(OpenRouterGateway::extract_reply(body).unwrap(), "Suspend it.");

        let empty: ChatResponseBody = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            OpenRouterGateway::extract_reply(empty),
            Err(GatewayError::InvalidResponse(_))
        ));

        let null_content: ChatResponseBody =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(OpenRouterGateway::extract_reply(null_content).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let gateway = OpenRouterGateway::new(settings("http://localhost", None)).unwrap();
        let result = gateway.complete(&request()).await;
        assert_eq!(
            result,
            Err(GatewayError::NotConfigured("OPENROUTER_API_KEY".into()))
        );
    }

    #[tokio::test]
    async fn test_successful_round_trip() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Get a suspension certificate."}}]}"#,
        )
        .await;
        let gateway = OpenRouterGateway::new(settings(&url, Some("sk-test"))).unwrap();

        let reply = gateway.complete(&request()).await.unwrap();
        assert_eq!(reply, "Get a suspension certificate.");

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.starts_with("post /chat/completions"));
        assert!(raw.contains("authorization: bearer sk-test"));
        assert!(raw.contains("http-referer: https://example.test"));
        assert!(raw.contains("x-title: aftersale"));
        assert!(raw.contains("scenario: b (letting the car go)"));
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let (url, server) =
            serve_once("HTTP/1.1 429 Too Many Requests", r#"{"error":"rate limited"}"#).await;
        let gateway = OpenRouterGateway::new(settings(&url, Some("sk-test"))).unwrap();

        let result = gateway.complete(&request()).await;
        server.await.unwrap();
        match result {
            Err(GatewayError::HttpStatus { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected HTTP status error, got {other:?}"),
        }
    }
}
