//! florcart - end-to-end cart checks against a live storefront.
//!
//! Parses arguments, sets up logging, and dispatches to a command.

use clap::Parser;
use florcart_cli::{cli, commands, error, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let no_color = args.no_color || !logger::should_use_colors();
    logger::init_logger(args.verbose, args.quiet, no_color);

    let result = match args.command {
        cli::Command::Run(run_args) => commands::run_execute(run_args, args.quiet).await,
        cli::Command::Money(money_args) => commands::money_execute(&money_args),
    };

    result.map_err(error::cli_error_to_miette)
}
