//! REPL (Read-Eval-Print Loop) for the assistant chat

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use aftersale_application::{AskAssistantUseCase, AssistantError, GatewayError};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

const FALLBACK_REPLY: &str =
    "Sorry, I couldn't answer that just now. Please try again in a moment.";

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: AskAssistantUseCase,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: AskAssistantUseCase) -> Self {
        Self {
            use_case,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path("chat_history.txt");
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            // The next line is only read once the previous reply is in
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          After-sale Assistant Chat          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if self.use_case.context().is_some() {
            println!("{}", "The assistant can see your survey answers.".dimmed());
            println!();
        }
        println!("Ask anything about insurance or paperwork after selling your car.");
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /context  - Show what the assistant knows about you");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /context         - Show what the assistant knows about you");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/context" => {
                println!();
                match self.use_case.context() {
                    Some(context) => {
                        println!("{}", ConsoleFormatter::indent(&context_summary(context), "  "))
                    }
                    None => println!("  No survey answers are shared with the assistant."),
                }
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, message: &str) {
        println!();

        let result = if self.config.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.send(message, &progress).await
        } else {
            self.use_case.send(message, &SimpleProgress).await
        };

        match result {
            Ok(reply) => println!("{}", ConsoleFormatter::assistant_reply(&reply)),
            Err(AssistantError::Gateway(GatewayError::NotConfigured(var))) => {
                eprintln!(
                    "{} set {} to enable the assistant",
                    "Assistant unavailable:".red().bold(),
                    var
                );
            }
            Err(e) => {
                println!("{}", ConsoleFormatter::assistant_reply(FALLBACK_REPLY));
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
    }
}

fn context_summary(context: &aftersale_domain::ChatContext) -> String {
    aftersale_domain::AssistantPrompt::context_block(context)
        .trim()
        .to_string()
}
