//! Parsing of survey REPL input lines

use aftersale_domain::Question;

/// What a line typed at the survey prompt means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyInput {
    /// Option values picked on the current question
    Select(Vec<String>),
    /// Empty line: leave a multi-select question
    Done,
    /// Slash command with its argument, if any
    Command { name: String, arg: Option<String> },
    /// Unusable input, with the reason
    Invalid(String),
}

/// Interpret `line` against `question`.
///
/// Options are picked by number (1-based) or by value. Single-select
/// questions accept exactly one pick; multi-select questions accept several
/// separated by spaces or commas.
pub fn parse_input(line: &str, question: &Question) -> SurveyInput {
    let line = line.trim();
    if line.is_empty() {
        return SurveyInput::Done;
    }

    if let Some(command) = line.strip_prefix('/') {
        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        return SurveyInput::Command { name, arg };
    }

    let mut values = Vec::new();
    for token in line.split([' ', ',']).filter(|t| !t.is_empty()) {
        let option = match token.parse::<usize>() {
            Ok(n) if n >= 1 => question.options.get(n - 1),
            Ok(_) => None,
            Err(_) => question.option(token),
        };
        match option {
            Some(option) => {
                if !values.contains(&option.value) {
                    values.push(option.value.clone());
                }
            }
            None => return SurveyInput::Invalid(format!("'{}' is not one of the options", token)),
        }
    }

    if !question.is_multiple() && values.len() > 1 {
        return SurveyInput::Invalid("Pick a single option".to_string());
    }
    SurveyInput::Select(values)
}
