//! Survey domain.
//!
//! - [`entities::Question`]: a question with its options, scenario branch and visibility rule
//! - [`answers::AnswerSet`]: answers recorded so far
//! - [`catalog::SurveyCatalog`]: validated question bank and solution catalog
//! - [`engine`]: scenario resolution, visibility, sequencing and recommendation

pub mod answers;
pub mod catalog;
pub mod engine;
pub mod entities;
