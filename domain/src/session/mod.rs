//! Assistant chat session domain.
//!
//! - [`entities::Message`]: a single message within a transcript
//! - [`entities::Transcript`]: ordered conversation with the assistant
//! - [`context::ChatContext`]: survey context sent along with the transcript

pub mod context;
pub mod entities;
