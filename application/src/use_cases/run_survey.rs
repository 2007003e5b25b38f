//! Run Survey use case
//!
//! Holds the state of one survey session: the answers so far and the id of
//! the question currently being asked. Every derived value (scenario,
//! eligible questions, recommendations) is recomputed from the answers
//! through the domain engine.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use aftersale_domain::{
    AnswerSet, ChatContext, NextStep, Question, ScenarioId, Solution, SurveyCatalog, is_complete,
    is_eligible, next_question, prune_ineligible, recommend, resolve_scenario, visible_questions,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by invalid interactions with a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Question '{question}' has no option '{value}'")]
    UnknownOption { question: String, value: String },

    #[error("Question '{0}' cannot be answered in the current state")]
    NotEligible(String),

    #[error("Question '{0}' is not a multiple-choice question")]
    NotMultiple(String),

    #[error("Select at least one option for '{0}' before continuing")]
    EmptySelection(String),

    #[error("The survey is already complete")]
    AlreadyComplete,
}

/// What happened after a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A multi-select value was toggled; the session stays on the question
    Toggled {
        value: String,
        selected: bool,
        /// Answers removed because they fell out of scope
        pruned: Vec<String>,
    },
    /// A single-select answer was recorded and the session moved on
    Advanced(Progression),
}

/// Where the session went after an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Next question id, `None` when the survey is complete
    pub next: Option<String>,
    /// Answers removed because they fell out of scope
    pub pruned: Vec<String>,
}

/// A single survey session
pub struct SurveySession {
    catalog: Arc<SurveyCatalog>,
    answers: AnswerSet,
    current: Option<String>,
    logger: Arc<dyn ConversationLogger>,
}

impl SurveySession {
    pub fn new(catalog: Arc<SurveyCatalog>) -> Self {
        let current = next_question(&catalog, None, &AnswerSet::new(), None)
            .question()
            .map(|q| q.id.clone());
        Self {
            catalog,
            answers: AnswerSet::new(),
            current,
            logger: Arc::new(NoConversationLogger),
        }
    }

    /// Set the conversation logger
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn catalog(&self) -> &SurveyCatalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn scenario(&self) -> Option<ScenarioId> {
        resolve_scenario(&self.catalog, &self.answers)
    }

    /// The question currently being asked, `None` once complete
    pub fn current_question(&self) -> Option<&Question> {
        self.current
            .as_deref()
            .and_then(|id| self.catalog.question(id))
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.catalog, &self.answers, self.scenario())
    }

    /// Answered and total eligible questions, for display
    pub fn progress(&self) -> (usize, usize) {
        let visible = visible_questions(&self.catalog, self.scenario(), &self.answers);
        let answered = visible
            .iter()
            .filter(|q| self.answers.is_answered(&q.id))
            .count();
        (answered, visible.len())
    }

    /// Ranked solutions for the answers so far
    pub fn recommendations(&self) -> Vec<&Solution> {
        recommend(&self.catalog, &self.answers)
    }

    /// Context object for the assistant
    pub fn chat_context(&self) -> ChatContext {
        ChatContext::seller(self.scenario(), self.answers.clone())
    }

    /// Select an option of a question.
    ///
    /// Multi-select questions toggle the value and stay current; use
    /// [`SurveySession::advance`] to move on. Single-select questions record
    /// the value and move to the next question. Any eligible question may be
    /// answered, not only the current one, so earlier answers can be changed.
    /// Answers whose question stops being eligible are dropped.
    pub fn select(&mut self, question_id: &str, value: &str) -> Result<SelectOutcome, SurveyError> {
        let catalog = Arc::clone(&self.catalog);
        let question = catalog
            .question(question_id)
            .ok_or_else(|| SurveyError::UnknownQuestion(question_id.to_string()))?;

        if !is_eligible(question, self.scenario(), &self.answers) {
            return Err(SurveyError::NotEligible(question_id.to_string()));
        }
        if question.option(value).is_none() {
            return Err(SurveyError::UnknownOption {
                question: question_id.to_string(),
                value: value.to_string(),
            });
        }

        if question.is_multiple() {
            let selected = self.answers.toggle(question_id, value);
            debug!(question = question_id, value, selected, "Toggled option");
            self.logger.log(ConversationEvent::new(
                "survey_answer",
                json!({ "question": question_id, "value": value, "selected": selected }),
            ));
            let pruned = self.prune();
            self.current = Some(question_id.to_string());
            return Ok(SelectOutcome::Toggled {
                value: value.to_string(),
                selected,
                pruned,
            });
        }

        let previous_scenario = self.scenario();
        self.answers.set_single(question_id, value);
        debug!(question = question_id, value, "Recorded answer");
        self.logger.log(ConversationEvent::new(
            "survey_answer",
            json!({ "question": question_id, "value": value, "selected": true }),
        ));

        let scenario = self.scenario();
        if scenario != previous_scenario {
            info!(
                from = ?previous_scenario,
                to = ?scenario,
                "Scenario changed"
            );
        }
        let pruned = self.prune();

        Ok(SelectOutcome::Advanced(self.move_past(question_id, pruned)))
    }

    /// Record every value of a multi-select question at once and move on.
    pub fn answer_multiple(
        &mut self,
        question_id: &str,
        values: &[&str],
    ) -> Result<Progression, SurveyError> {
        let question = self
            .catalog
            .question(question_id)
            .ok_or_else(|| SurveyError::UnknownQuestion(question_id.to_string()))?;
        if !question.is_multiple() {
            return Err(SurveyError::NotMultiple(question_id.to_string()));
        }
        if let Some(bad) = values.iter().find(|v| question.option(v).is_none()) {
            return Err(SurveyError::UnknownOption {
                question: question_id.to_string(),
                value: bad.to_string(),
            });
        }
        if !is_eligible(question, self.scenario(), &self.answers) {
            return Err(SurveyError::NotEligible(question_id.to_string()));
        }

        self.answers.set_multiple(question_id, values.iter().copied());
        self.logger.log(ConversationEvent::new(
            "survey_answer",
            json!({ "question": question_id, "values": values }),
        ));
        let pruned = self.prune();
        let mut progression = self.finish(question_id)?;
        progression.pruned = pruned;
        Ok(progression)
    }

    /// Leave the current multi-select question once it has a selection.
    pub fn advance(&mut self) -> Result<Progression, SurveyError> {
        let current = self.current.clone().ok_or(SurveyError::AlreadyComplete)?;
        self.finish(&current)
    }

    /// Leave a given multi-select question once it has a selection.
    ///
    /// Unlike [`SurveySession::advance`] this works on any eligible
    /// question, so an earlier answer being edited can be confirmed even
    /// after the survey is complete.
    pub fn finish(&mut self, question_id: &str) -> Result<Progression, SurveyError> {
        let question = self
            .catalog
            .question(question_id)
            .ok_or_else(|| SurveyError::UnknownQuestion(question_id.to_string()))?;

        if !question.is_multiple() {
            return Err(SurveyError::NotMultiple(question_id.to_string()));
        }
        if !is_eligible(question, self.scenario(), &self.answers) {
            return Err(SurveyError::NotEligible(question_id.to_string()));
        }
        if !self.answers.is_answered(question_id) {
            return Err(SurveyError::EmptySelection(question_id.to_string()));
        }
        Ok(self.move_past(question_id, Vec::new()))
    }

    /// Drop answers whose question is no longer eligible
    fn prune(&mut self) -> Vec<String> {
        let pruned = prune_ineligible(&self.catalog, &mut self.answers);
        if !pruned.is_empty() {
            info!("Dropped answers no longer in scope: {}", pruned.join(", "));
            self.logger.log(ConversationEvent::new(
                "survey_pruned",
                json!({ "questions": pruned }),
            ));
        }
        pruned
    }

    fn move_past(&mut self, question_id: &str, pruned: Vec<String>) -> Progression {
        let step = next_question(
            &self.catalog,
            Some(question_id),
            &self.answers,
            self.scenario(),
        );
        self.current = step.question().map(|q| q.id.clone());

        if let NextStep::Complete = step {
            let solutions: Vec<&str> = self
                .recommendations()
                .iter()
                .map(|s| s.id.as_str())
                .collect();
            info!("Survey complete with {} recommendations", solutions.len());
            self.logger.log(ConversationEvent::new(
                "survey_complete",
                json!({
                    "scenario": self.scenario(),
                    "answers": self.answers,
                    "solutions": solutions,
                }),
            ));
        }

        Progression {
            next: self.current.clone(),
            pruned,
        }
    }
}
