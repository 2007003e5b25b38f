//! Survey branching and recommendation engine.
//!
//! Every function here is a pure function of the catalog and the answer
//! set. Callers recompute on every change instead of caching results.

use super::answers::AnswerSet;
use super::catalog::SurveyCatalog;
use super::entities::{Question, ScenarioId};
use crate::solution::entities::Solution;
use std::collections::HashSet;

/// Outcome of [`next_question`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep<'c> {
    /// Ask this question next
    Question(&'c Question),
    /// Every eligible question has an answer
    Complete,
}

impl<'c> NextStep<'c> {
    pub fn question(&self) -> Option<&'c Question> {
        match *self {
            NextStep::Question(q) => Some(q),
            NextStep::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, NextStep::Complete)
    }
}

/// Resolve the active scenario from the trigger question's answer.
///
/// Returns `None` while the trigger question is unanswered or when the
/// chosen option selects no scenario. For a multi-value answer the first
/// value decides.
pub fn resolve_scenario(catalog: &SurveyCatalog, answers: &AnswerSet) -> Option<ScenarioId> {
    let trigger = catalog.trigger_question();
    let value = answers.get(&trigger.id)?.first()?;
    trigger.option(value)?.next_scenario
}

/// Scenario gate only (trigger rule, undetermined rule, branch rule).
fn in_scenario(question: &Question, scenario: Option<ScenarioId>) -> bool {
    if question.is_trigger() {
        return true;
    }
    let Some(active) = scenario else {
        return false;
    };
    question.branch.is_none_or(|branch| branch == active)
}

/// Whether a question may be asked given the scenario and answers so far.
pub fn is_eligible(question: &Question, scenario: Option<ScenarioId>, answers: &AnswerSet) -> bool {
    if !in_scenario(question, scenario) {
        return false;
    }
    if question.is_trigger() {
        return true;
    }
    match &question.show_if {
        Some(rule) => answers.contains_any(&rule.question_id, &rule.values),
        None => true,
    }
}

/// Questions eligible to be asked, in catalog order.
pub fn visible_questions<'c>(
    catalog: &'c SurveyCatalog,
    scenario: Option<ScenarioId>,
    answers: &AnswerSet,
) -> Vec<&'c Question> {
    catalog
        .questions()
        .iter()
        .filter(|q| is_eligible(q, scenario, answers))
        .collect()
}

/// Pick the question to ask after `last_answered`.
///
/// The scan starts right after the position of `last_answered` in the
/// scenario-filtered sequence (or at the start when it is `None` or not
/// part of that sequence) and returns the first eligible question without
/// an answer. Questions whose visibility rule fails are passed over. If
/// nothing is left after the position, the scan continues from the start so
/// that a question which became eligible behind the cursor is still asked;
/// `Complete` is therefore returned exactly when [`is_complete`] holds.
pub fn next_question<'c>(
    catalog: &'c SurveyCatalog,
    last_answered: Option<&str>,
    answers: &AnswerSet,
    scenario: Option<ScenarioId>,
) -> NextStep<'c> {
    let sequence: Vec<&Question> = catalog
        .questions()
        .iter()
        .filter(|q| in_scenario(q, scenario))
        .collect();

    let start = last_answered
        .and_then(|id| sequence.iter().position(|q| q.id == id))
        .map(|i| i + 1)
        .unwrap_or(0);

    sequence[start..]
        .iter()
        .chain(sequence[..start].iter())
        .copied()
        .find(|q| is_eligible(q, scenario, answers) && !answers.is_answered(&q.id))
        .map(NextStep::Question)
        .unwrap_or(NextStep::Complete)
}

/// True when every eligible question has a non-empty answer.
pub fn is_complete(
    catalog: &SurveyCatalog,
    answers: &AnswerSet,
    scenario: Option<ScenarioId>,
) -> bool {
    visible_questions(catalog, scenario, answers)
        .iter()
        .all(|q| answers.is_answered(&q.id))
}

/// Ranked, deduplicated solutions activated by the recorded answers.
///
/// Sorted by ascending priority; equal priorities keep catalog order.
/// Solution ids missing from the catalog are dropped.
pub fn recommend<'c>(catalog: &'c SurveyCatalog, answers: &AnswerSet) -> Vec<&'c Solution> {
    let mut candidates: HashSet<&str> = HashSet::new();
    for question in catalog.questions() {
        for value in answers.values(&question.id) {
            if let Some(option) = question.option(value) {
                candidates.extend(option.solution_ids.iter().map(String::as_str));
            }
        }
    }

    let mut ranked: Vec<&Solution> = catalog
        .solutions()
        .iter()
        .filter(|s| candidates.contains(s.id.as_str()))
        .collect();
    ranked.sort_by_key(|s| s.priority);
    ranked
}

/// Drop answers to questions that are no longer eligible.
///
/// Used after every recorded answer: a new scenario or a changed gating
/// answer can take questions out of scope, and removing one answer can
/// invalidate visibility rules further down, so this runs until nothing
/// changes.
/// Trigger answers are never removed. Returns the removed question ids in
/// removal order.
pub fn prune_ineligible(catalog: &SurveyCatalog, answers: &mut AnswerSet) -> Vec<String> {
    let mut removed = Vec::new();
    loop {
        let scenario = resolve_scenario(catalog, answers);
        let stale: Vec<String> = answers
            .question_ids()
            .filter(|id| {
                catalog
                    .question(id)
                    .is_some_and(|q| !is_eligible(q, scenario, answers))
            })
            .map(str::to_string)
            .collect();
        if stale.is_empty() {
            return removed;
        }
        for id in stale {
            answers.remove(&id);
            removed.push(id);
        }
    }
}
