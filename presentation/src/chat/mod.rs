//! Interactive chat module
//!
//! Provides a readline-based chat with the after-sale assistant.

mod repl;

pub use repl::ChatRepl;
