//! Snapshot of a survey state for non-interactive output

use aftersale_domain::{
    AnswerSet, ScenarioId, Solution, SurveyCatalog, is_complete, is_eligible, next_question,
    recommend, resolve_scenario, visible_questions,
};
use serde::Serialize;

/// A recommended solution as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: u32,
    pub cta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl From<&Solution> for SolutionView {
    fn from(solution: &Solution) -> Self {
        Self {
            id: solution.id.clone(),
            title: solution.title.clone(),
            description: solution.description.clone(),
            priority: solution.priority,
            cta: solution.cta.label.clone(),
            destination: solution.cta.destination().map(str::to_string),
        }
    }
}

/// Everything the engine derives from an answer set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationReport {
    pub scenario: Option<ScenarioId>,
    pub complete: bool,
    pub next_question: Option<String>,
    pub answered: usize,
    pub total: usize,
    /// Recorded answers whose question is not eligible in this state
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_answers: Vec<String>,
    pub solutions: Vec<SolutionView>,
}

impl RecommendationReport {
    pub fn build(catalog: &SurveyCatalog, answers: &AnswerSet) -> Self {
        let scenario = resolve_scenario(catalog, answers);
        let visible = visible_questions(catalog, scenario, answers);
        let answered = visible
            .iter()
            .filter(|q| answers.is_answered(&q.id))
            .count();
        let ignored_answers = answers
            .question_ids()
            .filter(|id| {
                catalog
                    .question(id)
                    .is_none_or(|q| !is_eligible(q, scenario, answers))
            })
            .map(str::to_string)
            .collect();

        Self {
            scenario,
            complete: is_complete(catalog, answers, scenario),
            next_question: next_question(catalog, None, answers, scenario)
                .question()
                .map(|q| q.id.clone()),
            answered,
            total: visible.len(),
            ignored_answers,
            solutions: recommend(catalog, answers)
                .into_iter()
                .map(SolutionView::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftersale_domain::{CatalogDefinition, Phase, Question, SurveyOption};

    fn catalog() -> SurveyCatalog {
        SurveyCatalog::new(CatalogDefinition {
            trigger_question: "trigger".into(),
            questions: vec![
                Question::new("trigger", Phase::Trigger, "Why?")
                    .with_option(SurveyOption::new("moving", "Moving").with_scenario(ScenarioId::B))
                    .with_option(
                        SurveyOption::new("replace", "Replace").with_scenario(ScenarioId::A),
                    ),
                Question::new("parking", Phase::Situation, "Parking?")
                    .with_branch(ScenarioId::B)
                    .with_option(
                        SurveyOption::new("vacant", "Vacant").with_solutions(["parking-share"]),
                    ),
                Question::new("nextCar", Phase::Situation, "Next car?")
                    .with_branch(ScenarioId::A)
                    .with_option(
                        SurveyOption::new("searching", "Searching").with_solutions(["car-search"]),
                    ),
            ],
            solutions: vec![
                Solution::new("parking-share", "Parking share", 1),
                Solution::new("car-search", "Car search", 5),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_partial_answers() {
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");

        let report = RecommendationReport::build(&catalog(), &answers);
        assert_eq!(report.scenario, Some(ScenarioId::B));
        assert!(!report.complete);
        assert_eq!(report.next_question.as_deref(), Some("parking"));
        assert_eq!((report.answered, report.total), (1, 2));
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn test_out_of_scenario_answers_are_reported_but_still_recommend() {
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        answers.set_single("parking", "vacant");
        answers.set_single("nextCar", "searching");

        let report = RecommendationReport::build(&catalog(), &answers);
        assert!(report.complete);
        assert_eq!(report.next_question, None);
        assert_eq!(report.ignored_answers, vec!["nextCar".to_string()]);
        let ids: Vec<&str> = report.solutions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["parking-share", "car-search"]);
        assert_eq!(report.solutions[0].destination.as_deref(), Some("/inquiry"));
    }
}
