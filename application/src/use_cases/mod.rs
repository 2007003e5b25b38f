//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_assistant;
pub mod run_survey;
