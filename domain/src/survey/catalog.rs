//! Validated, immutable survey catalog

use super::entities::Question;
use crate::core::error::CatalogError;
use crate::solution::entities::Solution;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default id of the question whose answer selects the scenario
pub const DEFAULT_TRIGGER_QUESTION: &str = "trigger";

fn default_trigger_question() -> String {
    DEFAULT_TRIGGER_QUESTION.to_string()
}

/// Raw catalog as written in a catalog file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    /// Id of the question whose answer selects the scenario
    #[serde(default = "default_trigger_question")]
    pub trigger_question: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

/// Question bank plus solution catalog (Aggregate)
///
/// Built once at startup through [`SurveyCatalog::new`], which rejects
/// malformed references. Immutable afterwards; engine operations take it by
/// reference.
#[derive(Debug, Clone)]
pub struct SurveyCatalog {
    trigger_question: String,
    questions: Vec<Question>,
    solutions: Vec<Solution>,
    question_index: HashMap<String, usize>,
    solution_index: HashMap<String, usize>,
}

impl SurveyCatalog {
    /// Validate a definition and build the catalog
    pub fn new(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        let CatalogDefinition {
            trigger_question,
            questions,
            solutions,
        } = definition;

        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut question_index = HashMap::with_capacity(questions.len());
        for (i, q) in questions.iter().enumerate() {
            if question_index.insert(q.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateQuestion(q.id.clone()));
            }
            if q.options.is_empty() {
                return Err(CatalogError::NoOptions(q.id.clone()));
            }
            let mut seen = HashSet::new();
            for option in &q.options {
                if !seen.insert(option.value.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        question: q.id.clone(),
                        value: option.value.clone(),
                    });
                }
                if option.next_scenario.is_some() && !q.is_trigger() {
                    return Err(CatalogError::ScenarioOnNonTrigger {
                        question: q.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }

        match question_index.get(&trigger_question) {
            None => return Err(CatalogError::MissingTrigger(trigger_question)),
            Some(&i) if !questions[i].is_trigger() => {
                return Err(CatalogError::TriggerNotInTriggerPhase(trigger_question));
            }
            Some(_) => {}
        }

        for q in &questions {
            let Some(show_if) = &q.show_if else {
                continue;
            };
            if show_if.question_id == q.id {
                return Err(CatalogError::SelfReferencingPredicate(q.id.clone()));
            }
            if show_if.values.is_empty() {
                return Err(CatalogError::EmptyPredicate(q.id.clone()));
            }
            let referenced = question_index
                .get(&show_if.question_id)
                .map(|&i| &questions[i])
                .ok_or_else(|| CatalogError::UnknownPredicateQuestion {
                    question: q.id.clone(),
                    referenced: show_if.question_id.clone(),
                })?;
            if let Some(value) = show_if
                .values
                .iter()
                .find(|v| referenced.option(v).is_none())
            {
                return Err(CatalogError::UnknownPredicateValue {
                    question: q.id.clone(),
                    referenced: referenced.id.clone(),
                    value: value.clone(),
                });
            }
        }

        let mut solution_index = HashMap::with_capacity(solutions.len());
        for (i, s) in solutions.iter().enumerate() {
            if solution_index.insert(s.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSolution(s.id.clone()));
            }
        }

        Ok(Self {
            trigger_question,
            questions,
            solutions,
            question_index,
            solution_index,
        })
    }

    /// Questions in catalog order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Solutions in catalog order
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.question_index.get(id).map(|&i| &self.questions[i])
    }

    pub fn solution(&self, id: &str) -> Option<&Solution> {
        self.solution_index.get(id).map(|&i| &self.solutions[i])
    }

    /// Position of a question in catalog order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.question_index.get(id).copied()
    }

    pub fn trigger_question_id(&self) -> &str {
        &self.trigger_question
    }

    /// The designated trigger question (guaranteed to exist)
    pub fn trigger_question(&self) -> &Question {
        &self.questions[self.question_index[&self.trigger_question]]
    }

    /// Solution ids referenced by options but missing from the catalog.
    ///
    /// These are tolerated (the recommender drops them) but worth reporting.
    pub fn dangling_solution_ids(&self) -> Vec<&str> {
        let mut dangling: Vec<&str> = Vec::new();
        for q in &self.questions {
            for option in &q.options {
                for id in &option.solution_ids {
                    if !self.solution_index.contains_key(id) && !dangling.contains(&id.as_str()) {
                        dangling.push(id.as_str());
                    }
                }
            }
        }
        dangling
    }
}

impl TryFrom<CatalogDefinition> for SurveyCatalog {
    type Error = CatalogError;

    fn try_from(definition: CatalogDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::entities::{Phase, ScenarioId, ShowIf, SurveyOption};

    fn trigger() -> Question {
        Question::new("trigger", Phase::Trigger, "Why?")
            .with_option(SurveyOption::new("moving", "Moving").with_scenario(ScenarioId::B))
    }

    fn definition(questions: Vec<Question>) -> CatalogDefinition {
        CatalogDefinition {
            trigger_question: "trigger".into(),
            questions,
            solutions: vec![Solution::new("parking-share", "Parking", 1)],
        }
    }

    #[test]
    fn test_valid_catalog() {
        let parking = Question::new("parking", Phase::Situation, "Parking?")
            .with_option(SurveyOption::new("vacant", "Vacant"))
            .with_option(SurveyOption::new("other", "Other"));
        let awareness = Question::new("parkingAwareness", Phase::Situation, "Aware?")
            .with_show_if(ShowIf::new("parking", ["vacant"]))
            .with_option(SurveyOption::new("no", "No").with_solutions(["parking-share"]));

        let catalog = SurveyCatalog::new(definition(vec![trigger(), parking, awareness])).unwrap();
        assert_eq!(catalog.questions().len(), 3);
        assert_eq!(catalog.trigger_question().id, "trigger");
        assert_eq!(catalog.position("parkingAwareness"), Some(2));
        assert!(catalog.solution("parking-share").is_some());
        assert!(catalog.dangling_solution_ids().is_empty());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            SurveyCatalog::new(definition(vec![])).unwrap_err(),
            CatalogError::Empty
        );
    }

    #[test]
    fn test_missing_trigger_rejected() {
        let q =
            Question::new("other", Phase::Trigger, "?").with_option(SurveyOption::new("a", "A"));
        assert_eq!(
            SurveyCatalog::new(definition(vec![q])).unwrap_err(),
            CatalogError::MissingTrigger("trigger".into())
        );
    }

    #[test]
    fn test_trigger_must_be_trigger_phase() {
        let q =
            Question::new("trigger", Phase::Needs, "?").with_option(SurveyOption::new("a", "A"));
        assert!(matches!(
            SurveyCatalog::new(definition(vec![q])),
            Err(CatalogError::TriggerNotInTriggerPhase(_))
        ));
    }

    #[test]
    fn test_duplicate_question_rejected() {
        assert_eq!(
            SurveyCatalog::new(definition(vec![trigger(), trigger()])).unwrap_err(),
            CatalogError::DuplicateQuestion("trigger".into())
        );
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let q = Question::new("q", Phase::Needs, "?")
            .with_option(SurveyOption::new("a", "A"))
            .with_option(SurveyOption::new("a", "Again"));
        assert!(matches!(
            SurveyCatalog::new(definition(vec![trigger(), q])),
            Err(CatalogError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn test_predicate_on_unknown_question_rejected() {
        let q = Question::new("q", Phase::Needs, "?")
            .with_show_if(ShowIf::new("nowhere", ["x"]))
            .with_option(SurveyOption::new("a", "A"));
        assert_eq!(
            SurveyCatalog::new(definition(vec![trigger(), q])).unwrap_err(),
            CatalogError::UnknownPredicateQuestion {
                question: "q".into(),
                referenced: "nowhere".into(),
            }
        );
    }

    #[test]
    fn test_predicate_on_unknown_value_rejected() {
        let q = Question::new("q", Phase::Needs, "?")
            .with_show_if(ShowIf::new("trigger", ["moving", "retiring"]))
            .with_option(SurveyOption::new("a", "A"));
        assert_eq!(
            SurveyCatalog::new(definition(vec![trigger(), q])).unwrap_err(),
            CatalogError::UnknownPredicateValue {
                question: "q".into(),
                referenced: "trigger".into(),
                value: "retiring".into(),
            }
        );
    }

    #[test]
    fn test_empty_and_self_predicates_rejected() {
        let empty = Question::new("q", Phase::Needs, "?")
            .with_show_if(ShowIf::new("trigger", Vec::<String>::new()))
            .with_option(SurveyOption::new("a", "A"));
        assert_eq!(
            SurveyCatalog::new(definition(vec![trigger(), empty])).unwrap_err(),
            CatalogError::EmptyPredicate("q".into())
        );

        let selfish = Question::new("q", Phase::Needs, "?")
            .with_show_if(ShowIf::new("q", ["a"]))
            .with_option(SurveyOption::new("a", "A"));
        assert_eq!(
            SurveyCatalog::new(definition(vec![trigger(), selfish])).unwrap_err(),
            CatalogError::SelfReferencingPredicate("q".into())
        );
    }

    #[test]
    fn test_scenario_on_non_trigger_rejected() {
        let q = Question::new("q", Phase::Situation, "?")
            .with_option(SurveyOption::new("a", "A").with_scenario(ScenarioId::A));
        assert!(matches!(
            SurveyCatalog::new(definition(vec![trigger(), q])),
            Err(CatalogError::ScenarioOnNonTrigger { .. })
        ));
    }

    #[test]
    fn test_dangling_solution_ids_reported() {
        let q = Question::new("q", Phase::Needs, "?")
            .with_option(SurveyOption::new("a", "A").with_solutions(["ghost", "parking-share"]));
        let catalog = SurveyCatalog::new(definition(vec![trigger(), q])).unwrap();
        assert_eq!(catalog.dangling_solution_ids(), vec!["ghost"]);
    }

    #[test]
    fn test_duplicate_solution_rejected() {
        let mut def = definition(vec![trigger()]);
        def.solutions.push(Solution::new("parking-share", "Again", 2));
        assert_eq!(
            SurveyCatalog::new(def).unwrap_err(),
            CatalogError::DuplicateSolution("parking-share".into())
        );
    }
}
