//! CLI entrypoint for aftersale
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use aftersale_application::{
    AskAssistantUseCase, ConversationLogger, NoConversationLogger, SurveySession,
};
use aftersale_domain::{
    AnswerSet, ChatContext, ParkingIncomeEstimate, SavingsEstimate, SurveyCatalog, TOP_INSURERS,
};
use aftersale_infrastructure::{
    CatalogLoader, ConfigLoader, FileConfig, JsonlConversationLogger, OpenRouterGateway,
    OpenRouterSettings,
};
use aftersale_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, OutputFormat, ParkingArgs, RecommendArgs,
    RecommendationReport, ReplConfig, SavingsArgs, SurveyArgs, SurveyOutcome, SurveyRepl,
};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Solution whose recommendation comes with a parking income estimate
const PARKING_SHARE_SOLUTION: &str = "parking-share";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting aftersale");

    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog.path.as_ref().map(PathBuf::from));
    let catalog = Arc::new(CatalogLoader::load(catalog_path.as_deref())?);

    let logger: Arc<dyn ConversationLogger> = match config.logging.conversation_log.as_deref() {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.clone(),
    };

    match cli.resolved_command() {
        Command::Survey(args) => {
            run_survey(&config, catalog, logger, repl_config, &args).await?;
        }
        Command::Chat => {
            let use_case = build_assistant(&config, ChatContext::inquiry(), logger)?;
            ChatRepl::new(use_case).with_config(repl_config).run().await?;
        }
        Command::Recommend(args) => run_recommend(&config, &catalog, &args)?,
        Command::Catalog => print!("{}", ConsoleFormatter::catalog_summary(&catalog)),
        Command::Savings(args) => run_savings(&config, &args),
        Command::Parking(args) => run_parking(&config, &args),
    }

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr, or to `file` through a non-blocking writer when set.
fn init_logging(verbose: u8, file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(file) = file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let path = Path::new(file);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", file))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_assistant(
    config: &FileConfig,
    context: ChatContext,
    logger: Arc<dyn ConversationLogger>,
) -> Result<AskAssistantUseCase> {
    let settings = OpenRouterSettings::from_config(&config.assistant);
    if settings.api_key.is_none() {
        warn!(
            "No API key found in {}; the assistant will not be able to answer",
            settings.api_key_env
        );
    }
    let gateway = Arc::new(OpenRouterGateway::new(settings)?);

    Ok(AskAssistantUseCase::new(gateway)
        .with_context(context)
        .with_config(config.behavior())
        .with_conversation_logger(logger))
}

async fn run_survey(
    config: &FileConfig,
    catalog: Arc<SurveyCatalog>,
    logger: Arc<dyn ConversationLogger>,
    repl_config: ReplConfig,
    args: &SurveyArgs,
) -> Result<()> {
    let session = SurveySession::new(catalog).with_logger(logger.clone());
    let mut repl = SurveyRepl::new(session).with_config(repl_config.clone());

    if repl.run()? == SurveyOutcome::Quit {
        println!("Bye!");
        return Ok(());
    }

    let session = repl.into_session();
    let recommendations = session.recommendations();
    println!();
    print!("{}", ConsoleFormatter::recommendations(&recommendations));
    if recommendations.iter().any(|s| s.id == PARKING_SHARE_SOLUTION) {
        println!();
        print!(
            "{}",
            ConsoleFormatter::parking(&ParkingIncomeEstimate::default())
        );
    }

    if args.no_chat {
        return Ok(());
    }

    println!();
    println!("Questions about what to do next? The assistant knows your answers.");
    let use_case = build_assistant(config, session.chat_context(), logger)?;
    ChatRepl::new(use_case).with_config(repl_config).run().await?;
    Ok(())
}

fn run_recommend(config: &FileConfig, catalog: &SurveyCatalog, args: &RecommendArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.answers)
        .with_context(|| format!("Failed to read {}", args.answers.display()))?;
    let answers: AnswerSet = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse answers in {}", args.answers.display()))?;

    let report = RecommendationReport::build(catalog, &answers);
    match output_format(config, args.output) {
        OutputFormat::Json => println!("{}", ConsoleFormatter::json(&report)),
        OutputFormat::Text => print!("{}", ConsoleFormatter::report(&report)),
    }
    Ok(())
}

fn run_savings(config: &FileConfig, args: &SavingsArgs) {
    let estimate = SavingsEstimate::calculate(
        args.monthly,
        args.age,
        args.grade,
        !args.no_vehicle_coverage,
    );
    match output_format(config, args.output) {
        OutputFormat::Json => println!(
            "{}",
            ConsoleFormatter::json(&serde_json::json!({
                "estimate": estimate,
                "insurers": TOP_INSURERS,
            }))
        ),
        OutputFormat::Text => print!("{}", ConsoleFormatter::savings(&estimate, TOP_INSURERS)),
    }
}

fn run_parking(config: &FileConfig, args: &ParkingArgs) {
    let estimate = ParkingIncomeEstimate::calculate(args.price_per_day, args.occupancy);
    match output_format(config, args.output) {
        OutputFormat::Json => println!("{}", ConsoleFormatter::json(&estimate)),
        OutputFormat::Text => print!("{}", ConsoleFormatter::parking(&estimate)),
    }
}

/// Command-line flag first, then the configured format, then text
fn output_format(config: &FileConfig, flag: Option<OutputFormat>) -> OutputFormat {
    flag.or_else(|| config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Text)
}
