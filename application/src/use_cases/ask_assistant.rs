//! Ask Assistant use case.
//!
//! Sends the running transcript, together with the survey context, to the
//! completion endpoint and appends the reply. At most one request is in
//! flight per conversation; a failed request leaves the transcript as it
//! was before the message was submitted.

use crate::config::BehaviorConfig;
use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ProgressNotifier;
use aftersale_domain::{ChatContext, Transcript};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors that can occur while asking the assistant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("A request is already in progress")]
    RequestInFlight,

    #[error("Message is empty")]
    EmptyMessage,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Use case for a chat conversation with the assistant.
pub struct AskAssistantUseCase {
    gateway: Arc<dyn CompletionGateway>,
    transcript: Mutex<Transcript>,
    context: Option<ChatContext>,
    config: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AskAssistantUseCase {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            gateway,
            transcript: Mutex::new(Transcript::new()),
            context: None,
            config: BehaviorConfig::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Attach the survey context sent with every request.
    pub fn with_context(mut self, context: ChatContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn context(&self) -> Option<&ChatContext> {
        self.context.as_ref()
    }

    /// Snapshot of the transcript.
    ///
    /// Waits for an outstanding request to finish.
    pub async fn transcript(&self) -> Transcript {
        self.transcript.lock().await.clone()
    }

    /// Send a user message and return the assistant's reply.
    pub async fn send(
        &self,
        message: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let mut transcript = self
            .transcript
            .try_lock()
            .map_err(|_| AssistantError::RequestInFlight)?;

        transcript.add_user_message(message);
        let request = self.build_request(&transcript);
        debug!(
            "Sending {} messages to the completion endpoint",
            request.transcript.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_request",
            json!({ "message": message, "context": self.context }),
        ));

        progress.on_request_start();
        let result = self.complete(&request).await;
        progress.on_request_complete(result.is_ok());

        match result {
            Ok(reply) => {
                info!("Assistant replied ({} chars)", reply.len());
                transcript.add_assistant_message(reply.clone());
                self.conversation_logger.log(ConversationEvent::new(
                    "assistant_reply",
                    json!({ "reply": reply }),
                ));
                Ok(reply)
            }
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                transcript.pop_user_message();
                self.conversation_logger.log(ConversationEvent::new(
                    "assistant_error",
                    json!({ "error": e.to_string(), "retryable": e.is_retryable() }),
                ));
                Err(AssistantError::Gateway(e))
            }
        }
    }

    fn build_request(&self, transcript: &Transcript) -> CompletionRequest {
        let messages = transcript.messages();
        let start = self
            .config
            .max_history
            .map(|max| messages.len().saturating_sub(max))
            .unwrap_or(0);
        CompletionRequest::new(messages[start..].to_vec(), self.context.clone())
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let reply = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.complete(request))
                .await
                .map_err(|_| GatewayError::Timeout)??,
            None => self.gateway.complete(request).await?,
        };
        if reply.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(
                "assistant reply was empty".to_string(),
            ));
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use aftersale_domain::{AnswerSet, Message, Role, ScenarioId};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Replies with a fixed string and records every request.
    struct EchoGateway {
        reply: Result<String, GatewayError>,
        requests: StdMutex<Vec<CompletionRequest>>,
    }

    impl EchoGateway {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                requests: StdMutex::new(Vec::new()),
            }
        }

        fn failing(error: GatewayError) -> Self {
            Self {
                reply: Err(error),
                requests: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionGateway for EchoGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    /// Blocks until released.
    struct GatedGateway {
        release: Notify,
    }

    #[async_trait]
    impl CompletionGateway for GatedGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            self.release.notified().await;
            Ok("done".to_string())
        }
    }

    struct SlowGateway;

    #[async_trait]
    impl CompletionGateway for SlowGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        calls: StdMutex<Vec<String>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_request_start(&self) {
            self.calls.lock().unwrap().push("start".into());
        }

        fn on_request_complete(&self, success: bool) {
            self.calls.lock().unwrap().push(format!("complete:{success}"));
        }
    }

    fn seller_context() -> ChatContext {
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        ChatContext::seller(Some(ScenarioId::B), answers)
    }

    #[tokio::test]
    async fn test_reply_is_appended_to_transcript() {
        let gateway = Arc::new(EchoGateway::replying("You can suspend the policy."));
        let use_case = AskAssistantUseCase::new(gateway.clone()).with_context(seller_context());
        let progress = RecordingProgress::default();

        let reply = use_case.send("  What about insurance?  ", &progress).await.unwrap();
        assert_eq!(reply, "You can suspend the policy.");

        let transcript = use_case.transcript().await;
        assert_eq!(
            transcript.messages(),
            &[
                Message::user("What about insurance?"),
                Message::assistant("You can suspend the policy."),
            ]
        );
        assert_eq!(
            *progress.calls.lock().unwrap(),
            vec!["start".to_string(), "complete:true".to_string()]
        );

        let requests = gateway.requests.lock().unwrap();
        let messages = requests[0].messages();
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("B (letting the car go)"));
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let gateway = Arc::new(EchoGateway::replying("unused"));
        let use_case = AskAssistantUseCase::new(gateway.clone());

        let result = use_case.send("   ", &NoProgress).await;
        assert_eq!(result, Err(AssistantError::EmptyMessage));
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_rolls_back_user_message() {
        let error = GatewayError::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        let gateway = Arc::new(EchoGateway::failing(error.clone()));
        let use_case = AskAssistantUseCase::new(gateway);
        let progress = RecordingProgress::default();

        let result = use_case.send("Hello", &progress).await;
        assert_eq!(result, Err(AssistantError::Gateway(error)));
        assert!(use_case.transcript().await.is_empty());
        assert_eq!(
            progress.calls.lock().unwrap().last().map(String::as_str),
            Some("complete:false")
        );
    }

    #[tokio::test]
    async fn test_blank_reply_is_invalid_response() {
        let gateway = Arc::new(EchoGateway::replying("  "));
        let use_case = AskAssistantUseCase::new(gateway);

        let result = use_case.send("Hello", &NoProgress).await;
        assert!(matches!(
            result,
            Err(AssistantError::Gateway(GatewayError::InvalidResponse(_)))
        ));
        assert!(use_case.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_second_request_while_in_flight_is_rejected() {
        let gateway = Arc::new(GatedGateway {
            release: Notify::new(),
        });
        let use_case = AskAssistantUseCase::new(gateway.clone());

        let (first, second) = tokio::join!(use_case.send("first", &NoProgress), async {
            let result = use_case.send("second", &NoProgress).await;
            gateway.release.notify_one();
            result
        });

        assert_eq!(first, Ok("done".to_string()));
        assert_eq!(second, Err(AssistantError::RequestInFlight));
        assert_eq!(use_case.transcript().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_gateway_timeout() {
        let use_case = AskAssistantUseCase::new(Arc::new(SlowGateway))
            .with_config(BehaviorConfig::with_timeout_seconds(1));

        let result = use_case.send("Hello", &NoProgress).await;
        assert_eq!(result, Err(AssistantError::Gateway(GatewayError::Timeout)));
        assert!(use_case.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_max_history_limits_sent_messages() {
        let gateway = Arc::new(EchoGateway::replying("ok"));
        let use_case = AskAssistantUseCase::new(gateway.clone())
            .with_config(BehaviorConfig::default().with_max_history(3));

        use_case.send("one", &NoProgress).await.unwrap();
        use_case.send("two", &NoProgress).await.unwrap();
        use_case.send("three", &NoProgress).await.unwrap();

        let requests = gateway.requests.lock().unwrap();
        let last = &requests[2].transcript;
        assert_eq!(last.len(), 3);
        assert_eq!(last[0], Message::user("two"));
        assert_eq!(last[2], Message::user("three"));
    }
}
