//! Completion Gateway port
//!
//! Defines the interface for the external chat-completion endpoint that
//! backs the assistant.

use aftersale_domain::{AssistantPrompt, ChatContext, Message};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Completion endpoint is not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Completion endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Whether the same request may succeed when sent again
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::ConnectionError(_) | GatewayError::Timeout => true,
            GatewayError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            GatewayError::NotConfigured(_) | GatewayError::InvalidResponse(_) => false,
        }
    }
}

/// A transcript plus the survey context it is asked in
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub transcript: Vec<Message>,
    pub context: Option<ChatContext>,
}

impl CompletionRequest {
    pub fn new(transcript: Vec<Message>, context: Option<ChatContext>) -> Self {
        Self {
            transcript,
            context,
        }
    }

    /// Messages to send: the system prompt (with context) followed by the
    /// transcript
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        messages.push(Message::system(AssistantPrompt::system_with_context(
            self.context.as_ref(),
        )));
        messages.extend(self.transcript.iter().cloned());
        messages
    }
}

/// Gateway to the completion endpoint
///
/// Implementations (adapters) live in the infrastructure layer. Failures
/// are returned as [`GatewayError`], never raised as panics.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the request and return the assistant's reply
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
