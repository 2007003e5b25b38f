//! REPL for taking the survey

use super::input::{SurveyInput, parse_input};
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use aftersale_application::{Progression, SelectOutcome, SurveyError, SurveySession};
use aftersale_domain::{Question, is_eligible};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// How the survey REPL ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyOutcome {
    /// Every eligible question was answered
    Completed,
    /// The user left early
    Quit,
}

enum Flow {
    Continue,
    Quit,
    Edit(String),
}

/// Interactive survey REPL
pub struct SurveyRepl {
    session: SurveySession,
    config: ReplConfig,
}

impl SurveyRepl {
    pub fn new(session: SurveySession) -> Self {
        Self {
            session,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn into_session(self) -> SurveySession {
        self.session
    }

    /// Run the survey until it completes or the user quits
    pub fn run(&mut self) -> RlResult<SurveyOutcome> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path("survey_history.txt");
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        // Question being re-answered through /change, if any
        let mut editing: Option<String> = None;

        let outcome = loop {
            let question = match editing.as_deref() {
                Some(id) => self.session.catalog().question(id).cloned(),
                None => self.session.current_question().cloned(),
            };
            let Some(question) = question else {
                break SurveyOutcome::Completed;
            };

            println!();
            print!(
                "{}",
                ConsoleFormatter::question(
                    &question,
                    self.session.progress(),
                    self.session.answers().values(&question.id),
                )
            );

            let line = match rl.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break SurveyOutcome::Quit,
                Err(err) => return Err(err),
            };

            match parse_input(&line, &question) {
                SurveyInput::Done => {
                    if !question.is_multiple() {
                        println!("{}", "Pick one of the options by number.".yellow());
                        continue;
                    }
                    // Leave the displayed question, which may be one being edited
                    match self.session.finish(&question.id) {
                        Ok(progression) => {
                            Self::report_progression(&progression);
                            editing = None;
                        }
                        Err(e) => Self::print_error(&e),
                    }
                }
                SurveyInput::Select(values) => {
                    let _ = rl.add_history_entry(line.trim());
                    if self.apply_selection(&question, &values) && !question.is_multiple() {
                        editing = None;
                    }
                }
                SurveyInput::Command { name, arg } => {
                    match self.handle_command(&name, arg.as_deref()) {
                        Flow::Continue => {}
                        Flow::Quit => break SurveyOutcome::Quit,
                        Flow::Edit(id) => editing = Some(id),
                    }
                }
                SurveyInput::Invalid(reason) => println!("{}", reason.yellow()),
            }
        };

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(outcome)
    }

    /// Record the picked values. Returns true when every pick was accepted.
    fn apply_selection(&mut self, question: &Question, values: &[String]) -> bool {
        if values.is_empty() {
            println!("{}", "Pick one of the options by number.".yellow());
            return false;
        }
        for value in values {
            match self.session.select(&question.id, value) {
                Ok(SelectOutcome::Toggled { pruned, .. }) => Self::report_pruned(&pruned),
                Ok(SelectOutcome::Advanced(progression)) => Self::report_progression(&progression),
                Err(e) => {
                    Self::print_error(&e);
                    return false;
                }
            }
        }
        true
    }

    fn report_progression(progression: &Progression) {
        Self::report_pruned(&progression.pruned);
    }

    fn report_pruned(pruned: &[String]) {
        if !pruned.is_empty() {
            println!(
                "{} {}",
                "Cleared answers that no longer apply:".yellow(),
                pruned.join(", ")
            );
        }
    }

    fn print_error(error: &SurveyError) {
        println!("{} {}", "x".red(), error);
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           After-sale Check-in Survey        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Answer by typing the option number.");
        println!("Type /help for commands.");
    }

    fn handle_command(&self, name: &str, arg: Option<&str>) -> Flow {
        match name {
            "quit" | "exit" | "q" => Flow::Quit,
            "help" | "h" | "?" => {
                println!();
                println!("Commands:");
                println!("  /answers          - Show your answers so far");
                println!("  /change <id>      - Answer an earlier question again");
                println!("  /help, /h, /?     - Show this help");
                println!("  /quit, /exit, /q  - Leave the survey");
                Flow::Continue
            }
            "answers" => {
                self.print_answers();
                Flow::Continue
            }
            "change" => {
                let Some(id) = arg else {
                    println!("{}", "Usage: /change <question id>".yellow());
                    return Flow::Continue;
                };
                match self.session.catalog().question(id) {
                    Some(q) if is_eligible(q, self.session.scenario(), self.session.answers()) => {
                        Flow::Edit(q.id.clone())
                    }
                    Some(_) => {
                        Self::print_error(&SurveyError::NotEligible(id.to_string()));
                        Flow::Continue
                    }
                    None => {
                        Self::print_error(&SurveyError::UnknownQuestion(id.to_string()));
                        Flow::Continue
                    }
                }
            }
            _ => {
                println!("Unknown command: /{}", name);
                println!("Type /help for available commands");
                Flow::Continue
            }
        }
    }

    fn print_answers(&self) {
        let answers = self.session.answers();
        println!();
        if answers.is_empty() {
            println!("No answers yet.");
            return;
        }
        if let Some(scenario) = self.session.scenario() {
            println!("{} {} ({})", "Scenario:".cyan().bold(), scenario, scenario.description());
        }
        for (id, answer) in answers.iter() {
            let labels = match self.session.catalog().question(id) {
                Some(q) => answer
                    .values()
                    .iter()
                    .map(|v| q.label_for(v).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                None => answer.to_string(),
            };
            println!("  {} {}", format!("{}:", id).dimmed(), labels);
        }
    }
}
