//! Domain error types

use thiserror::Error;

/// Configuration errors found while validating a survey catalog.
///
/// Raised once at load time; a catalog that passes validation never makes
/// the engine operations fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no questions")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Question '{0}' has no options")]
    NoOptions(String),

    #[error("Duplicate option value '{value}' in question '{question}'")]
    DuplicateOption { question: String, value: String },

    #[error("Duplicate solution id: {0}")]
    DuplicateSolution(String),

    #[error("Trigger question '{0}' not found")]
    MissingTrigger(String),

    #[error("Question '{0}' is designated as trigger but is not in the trigger phase")]
    TriggerNotInTriggerPhase(String),

    #[error("Question '{question}' has a visibility rule on unknown question '{referenced}'")]
    UnknownPredicateQuestion { question: String, referenced: String },

    #[error(
        "Question '{question}' has a visibility rule on '{referenced}' with unknown value '{value}'"
    )]
    UnknownPredicateValue {
        question: String,
        referenced: String,
        value: String,
    },

    #[error("Question '{0}' has a visibility rule with no qualifying values")]
    EmptyPredicate(String),

    #[error("Question '{0}' refers to itself in its visibility rule")]
    SelfReferencingPredicate(String),

    #[error("Option '{value}' of non-trigger question '{question}' selects a scenario")]
    ScenarioOnNonTrigger { question: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_question() {
        let error = CatalogError::UnknownPredicateValue {
            question: "parkingAwareness".into(),
            referenced: "parking".into(),
            value: "empty".into(),
        };
        let msg = error.to_string();
        assert!(msg.contains("parkingAwareness"));
        assert!(msg.contains("'empty'"));
    }

    #[test]
    fn test_missing_trigger_display() {
        assert_eq!(
            CatalogError::MissingTrigger("trigger".into()).to_string(),
            "Trigger question 'trigger' not found"
        );
    }
}
