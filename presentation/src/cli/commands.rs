//! CLI command definitions

use aftersale_domain::{DEFAULT_PARKING_OCCUPANCY_PERCENT, DEFAULT_PARKING_PRICE_PER_DAY};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for non-interactive commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<aftersale_domain::OutputFormat> for OutputFormat {
    fn from(format: aftersale_domain::OutputFormat) -> Self {
        match format {
            aftersale_domain::OutputFormat::Text => OutputFormat::Text,
            aftersale_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for aftersale
#[derive(Parser, Debug)]
#[command(name = "aftersale")]
#[command(author, version, about = "After-sale survey and assistant for people who just sold their car")]
#[command(long_about = r#"
Runs the after-sale survey: a short branching questionnaire whose first answer
decides the scenario (replacing the car, letting it go, or stopping driving).
At the end it recommends follow-up solutions and opens an assistant chat that
knows your answers.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./aftersale.toml       Project-level config
3. ~/.config/aftersale/config.toml   Global config

Example:
  aftersale
  aftersale chat
  aftersale recommend answers.json --output json
  aftersale savings --age 35 --grade 16 --monthly 6000
  aftersale parking --price-per-day 800
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Survey catalog to load instead of the bundled one
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; `survey` when none was given
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Survey(SurveyArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take the survey interactively (default)
    Survey(SurveyArgs),

    /// Chat with the assistant without taking the survey
    Chat,

    /// Evaluate a saved answer set and print the recommendations
    Recommend(RecommendArgs),

    /// Validate and summarise the survey catalog
    Catalog,

    /// Estimate insurance savings against the market rate
    Savings(SavingsArgs),

    /// Estimate income from renting out a vacant parking space
    Parking(ParkingArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyArgs {
    /// Do not offer the assistant chat after the survey
    #[arg(long)]
    pub no_chat: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RecommendArgs {
    /// JSON file mapping question ids to a value or a list of values
    #[arg(value_name = "ANSWERS")]
    pub answers: PathBuf,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SavingsArgs {
    /// Age of the main driver
    #[arg(long)]
    pub age: u32,

    /// No-claims rating grade (1-20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub grade: u32,

    /// Current monthly premium in yen
    #[arg(long, value_name = "YEN")]
    pub monthly: u32,

    /// Compare against plans without vehicle coverage
    #[arg(long)]
    pub no_vehicle_coverage: bool,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ParkingArgs {
    /// Daily rate in yen
    #[arg(long, value_name = "YEN", default_value_t = DEFAULT_PARKING_PRICE_PER_DAY)]
    pub price_per_day: u32,

    /// Share of days the space is booked, in percent
    #[arg(
        long,
        value_name = "PERCENT",
        default_value_t = DEFAULT_PARKING_OCCUPANCY_PERCENT,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub occupancy: u32,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}
