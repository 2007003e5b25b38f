//! Presentation-level configuration
//!
//! REPL behavior shared by the survey and chat loops.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show a spinner while waiting for the assistant
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// Resolved history file path.
    ///
    /// A leading `~/` expands to the home directory. Without a configured
    /// file, `<data dir>/aftersale/<default_name>` is used.
    pub fn history_path(&self, default_name: &str) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|dir| dir.join("aftersale").join(default_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_path() {
        let config = ReplConfig {
            history_file: Some("/tmp/aftersale-history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.history_path("chat_history.txt"),
            Some(PathBuf::from("/tmp/aftersale-history.txt"))
        );
    }

    #[test]
    fn test_default_history_path_uses_data_dir() {
        let config = ReplConfig::default();
        if let Some(path) = config.history_path("chat_history.txt") {
            assert!(path.ends_with("aftersale/chat_history.txt"));
        }
    }
}
