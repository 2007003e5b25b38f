//! Infrastructure layer for aftersale
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus catalog and configuration file loading.

pub mod catalog;
pub mod completion;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use catalog::{BUNDLED_CATALOG, CatalogLoadError, CatalogLoader};
pub use completion::{OpenRouterGateway, OpenRouterSettings};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAssistantConfig, FileCatalogConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
