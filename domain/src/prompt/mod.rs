//! Prompt templates for the assistant chat.

mod template;

pub use template::AssistantPrompt;
