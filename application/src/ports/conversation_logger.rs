//! Session transcript port.
//!
//! Survey answers and assistant exchanges are recorded as machine-readable
//! events through [`ConversationLogger`]. Diagnostics stay on `tracing`.

use serde_json::Value;

/// One transcript record
pub struct ConversationEvent {
    /// `survey_answer`, `survey_pruned`, `assistant_reply`, ...
    pub event_type: &'static str,
    /// Event fields, merged into the record by the logger
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and non-fallible so that a broken log file never
/// interrupts a survey; implementations swallow their own errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when `[logging] conversation_log` is not set.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
