//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file written through a non-blocking appender
    pub file: Option<String>,
    /// JSONL file receiving survey and assistant events
    pub conversation_log: Option<String>,
}
