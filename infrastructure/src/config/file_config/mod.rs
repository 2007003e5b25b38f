//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod assistant;
mod catalog;
mod logging;
mod output;
mod repl;

pub use assistant::{DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, FileAssistantConfig};
pub use catalog::FileCatalogConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;

use aftersale_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("assistant.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("assistant.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("assistant.max_history cannot be 0")]
    InvalidMaxHistory,

    #[error("assistant.model cannot be empty")]
    EmptyModelName,

    #[error("assistant.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Catalog source
    pub catalog: FileCatalogConfig,
    /// Completion endpoint settings
    pub assistant: FileAssistantConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        let assistant = &self.assistant;

        if assistant.timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if assistant.max_tokens == 0 {
            issues.push(ConfigValidationError::InvalidMaxTokens);
        }
        if assistant.max_history == Some(0) {
            issues.push(ConfigValidationError::InvalidMaxHistory);
        }
        if assistant.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if assistant.endpoint.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyEndpoint);
        }

        issues
    }

    /// Use case behavior derived from the `[assistant]` section
    pub fn behavior(&self) -> BehaviorConfig {
        let behavior = BehaviorConfig::from_timeout_seconds(self.assistant.timeout_seconds);
        match self.assistant.max_history {
            Some(max) => behavior.with_max_history(max),
            None => behavior,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftersale_domain::OutputFormat;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[catalog]
path = "catalog.toml"

[assistant]
model = "openai/gpt-4o-mini"
max_tokens = 500
timeout_seconds = 20
title = "Aftersale"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/aftersale/history.txt"

[logging]
conversation_log = "conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("catalog.toml"));
        assert_eq!(config.assistant.model, "openai/gpt-4o-mini");
        assert_eq!(config.assistant.max_tokens, 500);
        assert_eq!(config.assistant.title.as_deref(), Some("Aftersale"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("conversation.jsonl")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[assistant]
max_tokens = 200
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.max_tokens, 200);
        // Defaults should apply
        assert_eq!(config.assistant.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
        assert!(config.catalog.path.is_none());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[assistant]
model = " "
endpoint = ""
max_tokens = 0
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            vec![
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::InvalidMaxTokens,
                ConfigValidationError::EmptyModelName,
                ConfigValidationError::EmptyEndpoint,
            ]
        );
    }

    #[test]
    fn test_behavior_from_assistant_section() {
        let mut config = FileConfig::default();
        config.assistant.timeout_seconds = Some(15);
        config.assistant.max_history = Some(8);

        let behavior = config.behavior();
        assert_eq!(behavior.timeout, Some(Duration::from_secs(15)));
        assert_eq!(behavior.max_history, Some(8));
    }
}
