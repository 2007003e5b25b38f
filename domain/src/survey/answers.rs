//! Answer set value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded answer: one value for single-select questions, an ordered set
/// of values for multi-select questions.
///
/// Serialized untagged so that the wire shape is `"value"` or
/// `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// All selected values, in selection order
    pub fn values(&self) -> &[String] {
        match self {
            Answer::Single(v) => std::slice::from_ref(v),
            Answer::Multiple(vs) => vs,
        }
    }

    /// First selected value (used for scenario resolution)
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.values().join(", "))
    }
}

/// Mapping from question id to the recorded answer (Value Object)
///
/// Keys are kept sorted so that serialization and iteration are
/// deterministic regardless of the order answers were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Values recorded for a question (empty when unanswered)
    pub fn values(&self, question_id: &str) -> &[String] {
        self.answers
            .get(question_id)
            .map(Answer::values)
            .unwrap_or(&[])
    }

    /// A question counts as answered only with a non-empty answer
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(|a| !a.is_empty())
    }

    /// Whether the recorded answer intersects `candidates`
    pub fn contains_any(&self, question_id: &str, candidates: &[String]) -> bool {
        self.values(question_id)
            .iter()
            .any(|v| candidates.iter().any(|c| c == v))
    }

    /// Record a single-select answer, replacing any previous value
    pub fn set_single(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.answers
            .insert(question_id.into(), Answer::Single(value.into()));
    }

    /// Record a multi-select answer as a whole
    pub fn set_multiple<I, S>(&mut self, question_id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for v in values {
            let v = v.into();
            if !collected.contains(&v) {
                collected.push(v);
            }
        }
        let id = question_id.into();
        if collected.is_empty() {
            self.answers.remove(&id);
        } else {
            self.answers.insert(id, Answer::Multiple(collected));
        }
    }

    /// Toggle a value of a multi-select answer.
    ///
    /// Selecting an already-selected value removes it. When the last value
    /// is removed the entry disappears, so toggling twice restores the
    /// previous state exactly. Returns `true` if the value is now selected.
    pub fn toggle(&mut self, question_id: &str, value: &str) -> bool {
        let mut current: Vec<String> = self.values(question_id).to_vec();
        let selected = if let Some(pos) = current.iter().position(|v| v == value) {
            current.remove(pos);
            false
        } else {
            current.push(value.to_string());
            true
        };

        if current.is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers
                .insert(question_id.to_string(), Answer::Multiple(current));
        }
        selected
    }

    pub fn remove(&mut self, question_id: &str) -> Option<Answer> {
        self.answers.remove(question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
