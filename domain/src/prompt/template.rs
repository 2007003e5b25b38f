//! Assistant prompt template

use crate::session::context::ChatContext;

/// Templates for the assistant's system prompt
pub struct AssistantPrompt;

impl AssistantPrompt {
    /// Fixed persona and rules of the assistant
    pub fn system() -> &'static str {
        r#"You are an assistant that helps customers who have just sold their car sort out their insurance and paperwork.

Stance:
- Never sell anything
- Stick to organising information and handling procedures on the user's behalf
- Relieving the user's worries comes first
- Avoid jargon and explain things plainly

Scope:
- Cancelling or switching car insurance
- Guidance on the procedures that remain after a sale
- Insurance for the next car
- Support when an accident claim is still in progress

Reply style:
- Short and easy to follow
- Always give a concrete next step
- Ask for clarification when something is unclear"#
    }

    /// Survey context block appended to the system prompt
    pub fn context_block(context: &ChatContext) -> String {
        let mut block = String::from("\n\n[User information (survey answers)]\n");
        block.push_str(context.user_type.describe());
        block.push('\n');
        if let Some(scenario) = context.scenario_type {
            block.push_str(&format!(
                "- scenario: {} ({})\n",
                scenario,
                scenario.description()
            ));
        }
        for (question_id, answer) in context.answers.iter() {
            block.push_str(&format!("- {}: {}\n", question_id, answer));
        }
        block
    }

    /// Full system prompt for a request
    pub fn system_with_context(context: Option<&ChatContext>) -> String {
        match context {
            Some(ctx) => format!("{}{}", Self::system(), Self::context_block(ctx)),
            None => Self::system().to_string(),
        }
    }
}
