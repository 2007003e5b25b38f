//! Completion endpoint adapters
//!
//! Implements the [`CompletionGateway`](aftersale_application::CompletionGateway)
//! port over an OpenAI-compatible chat completions API (OpenRouter by default).

mod openrouter;

pub use openrouter::{OpenRouterGateway, OpenRouterSettings};
