//! Configuration file loading for aftersale
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./aftersale.toml` or `./.aftersale.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/aftersale/config.toml`
//! 4. Fallback: `~/.config/aftersale/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    FileAssistantConfig, FileCatalogConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileReplConfig,
};
pub use loader::ConfigLoader;
