//! Application layer for aftersale
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    completion_gateway::{CompletionGateway, CompletionRequest, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::ask_assistant::{AskAssistantUseCase, AssistantError};
pub use use_cases::run_survey::{Progression, SelectOutcome, SurveyError, SurveySession};
