//! Survey context attached to assistant requests

use crate::survey::answers::AnswerSet;
use crate::survey::entities::ScenarioId;
use serde::{Deserialize, Serialize};

/// Who the assistant is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Completed a car sale and the survey
    #[default]
    Seller,
    /// General inquiry without survey context
    Inquiry,
}

impl UserType {
    /// Description included in the assistant prompt
    pub fn describe(&self) -> &'static str {
        match self {
            UserType::Seller => "Customer who has sold their car (survey respondent)",
            UserType::Inquiry => "General inquiry",
        }
    }
}

/// Context object sent with every completion request (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub scenario_type: Option<ScenarioId>,
    pub answers: AnswerSet,
}

impl ChatContext {
    pub fn seller(scenario_type: Option<ScenarioId>, answers: AnswerSet) -> Self {
        Self {
            user_type: UserType::Seller,
            scenario_type,
            answers,
        }
    }

    pub fn inquiry() -> Self {
        Self {
            user_type: UserType::Inquiry,
            scenario_type: None,
            answers: AnswerSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wire_shape() {
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        let context = ChatContext::seller(Some(ScenarioId::B), answers);
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["type"], "seller");
        assert_eq!(json["scenarioType"], "B");
        assert_eq!(json["answers"]["trigger"], "moving");
    }
}
