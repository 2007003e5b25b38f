//! Presentation layer for aftersale
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive survey and chat interfaces.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod survey;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{
    Cli, Command, OutputFormat, ParkingArgs, RecommendArgs, SavingsArgs, SurveyArgs,
};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use output::report::{RecommendationReport, SolutionView};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use survey::{SurveyOutcome, SurveyRepl};
