//! Survey entities: questions, options and the scenario tags they drive.

use serde::{Deserialize, Serialize};

/// Narrative stage a question belongs to.
///
/// Only `Trigger` affects eligibility; the other phases are used for pacing
/// and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Why the user let the car go
    Trigger,
    /// Current state of the car, insurance, parking
    Situation,
    /// What the user may want next
    Needs,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Trigger => "trigger",
            Phase::Situation => "situation",
            Phase::Needs => "needs",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a question accepts one value or a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Single,
    Multiple,
}

/// Coarse classification of the user's situation (Value Object)
///
/// Chosen by the answer to the designated trigger question. Questions
/// restricted to a scenario are only asked inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Replacing the car with another one
    A,
    /// Letting the car go without a replacement for now
    B,
    /// Stopping driving altogether
    C,
}

impl ScenarioId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::A => "A",
            ScenarioId::B => "B",
            ScenarioId::C => "C",
        }
    }

    /// Human readable description of the scenario
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::A => "replacing the car",
            ScenarioId::B => "letting the car go",
            ScenarioId::C => "stopping driving",
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of educational hint shown before a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    #[default]
    Info,
    Nudge,
    Tip,
}

/// Message displayed before a question is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub text: String,
    #[serde(default)]
    pub kind: HintKind,
}

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    /// Value recorded in the answer set (unique within the question)
    pub value: String,
    /// Display label
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Solutions activated when this option is selected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solution_ids: Vec<String>,
    /// Scenario selected by this option (trigger questions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scenario: Option<ScenarioId>,
}

impl SurveyOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
            solution_ids: Vec::new(),
            next_scenario: None,
        }
    }

    pub fn with_solutions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.solution_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scenario(mut self, scenario: ScenarioId) -> Self {
        self.next_scenario = Some(scenario);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Visibility predicate: show the question only when the referenced
/// question's answer contains one of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowIf {
    pub question_id: String,
    pub values: Vec<String>,
}

impl ShowIf {
    pub fn new<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A survey question (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub phase: Phase,
    pub text: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    pub options: Vec<SurveyOption>,
    /// Only asked while this scenario is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<ScenarioId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<Hint>,
}

impl Question {
    pub fn new(id: impl Into<String>, phase: Phase, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase,
            text: text.into(),
            question_type: QuestionType::Single,
            options: Vec::new(),
            branch: None,
            show_if: None,
            hint: None,
        }
    }

    pub fn multiple(mut self) -> Self {
        self.question_type = QuestionType::Multiple;
        self
    }

    pub fn with_option(mut self, option: SurveyOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_branch(mut self, scenario: ScenarioId) -> Self {
        self.branch = Some(scenario);
        self
    }

    pub fn with_show_if(mut self, show_if: ShowIf) -> Self {
        self.show_if = Some(show_if);
        self
    }

    pub fn with_hint(mut self, text: impl Into<String>, kind: HintKind) -> Self {
        self.hint = Some(Hint {
            text: text.into(),
            kind,
        });
        self
    }

    pub fn is_trigger(&self) -> bool {
        self.phase == Phase::Trigger
    }

    pub fn is_multiple(&self) -> bool {
        self.question_type == QuestionType::Multiple
    }

    /// Find an option by its value
    pub fn option(&self, value: &str) -> Option<&SurveyOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Label for a value, falling back to the value itself
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.option(value).map(|o| o.label.as_str()).unwrap_or(value)
    }
}
