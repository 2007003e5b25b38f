//! Domain layer for aftersale
//!
//! This crate contains the survey engine, the solution catalog, the assistant
//! chat entities and the insurance pricing table. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Scenario
//!
//! The answer to the designated trigger question selects a scenario
//! (A: replacing the car, B: letting it go, C: stopping driving). Questions
//! restricted to a scenario are only asked inside it.
//!
//! ## Engine
//!
//! Five pure functions over an immutable [`SurveyCatalog`] and an
//! [`AnswerSet`]:
//!
//! - [`resolve_scenario`]: active scenario, or undetermined
//! - [`visible_questions`]: questions eligible to be asked
//! - [`next_question`]: what to ask next, or complete
//! - [`is_complete`]: every eligible question answered
//! - [`recommend`]: ranked, deduplicated solutions

pub mod config;
pub mod core;
pub mod pricing;
pub mod prompt;
pub mod session;
pub mod solution;
pub mod survey;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::CatalogError;
pub use pricing::{
    DEFAULT_PARKING_OCCUPANCY_PERCENT, DEFAULT_PARKING_PRICE_PER_DAY, Insurer,
    ParkingIncomeEstimate, SavingsEstimate, TOP_INSURERS, recommended_monthly_price,
};
pub use prompt::AssistantPrompt;
pub use session::{
    context::{ChatContext, UserType},
    entities::{Message, Role, Transcript},
};
pub use solution::entities::{Cta, CtaAction, Partner, Solution};
pub use survey::{
    answers::{Answer, AnswerSet},
    catalog::{CatalogDefinition, DEFAULT_TRIGGER_QUESTION, SurveyCatalog},
    engine::{
        NextStep, is_complete, is_eligible, next_question, prune_ineligible, recommend,
        resolve_scenario, visible_questions,
    },
    entities::{Hint, HintKind, Phase, Question, QuestionType, ScenarioId, ShowIf, SurveyOption},
};
