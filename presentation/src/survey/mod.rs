//! Interactive survey module
//!
//! Walks the user through the survey one question at a time.

mod input;
mod repl;

pub use input::{SurveyInput, parse_input};
pub use repl::{SurveyOutcome, SurveyRepl};
