use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::ScenarioSelection;

/// Available florcart subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run storefront scenarios in Chrome
    ///
    /// Each scenario gets a fresh browser profile, so it starts with an
    /// empty cart. Exits non-zero if any scenario fails.
    Run(RunArgs),

    /// Parse price text and print the canonical amounts
    ///
    /// Useful for checking how a storefront's price format is read.
    ///
    /// Examples:
    ///   florcart money '$19.99' '19,99 €' '$120.000'
    ///   florcart money --sum '$12.00' '$8.50'
    Money(MoneyArgs),
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Scenario to run
    #[arg(short, long, value_enum, default_value = "all")]
    pub scenario: ScenarioSelection,

    /// Storefront base URL (overrides config and FLORCART_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub visible: bool,

    /// Directory for screenshots
    #[arg(long, value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Path to a config file (default: ./florcart.toml when present)
    #[arg(short, long, value_name = "PATH", env = "FLORCART_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the money command
#[derive(Args, Debug)]
pub struct MoneyArgs {
    /// Price texts to parse
    #[arg(required = true, value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Also print the sum of all parsed amounts
    #[arg(long)]
    pub sum: bool,
}
