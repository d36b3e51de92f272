//! Command-line interface definition for florcart.
//!
//! # Command Structure
//!
//! - `florcart run` - Drive Chrome through the storefront scenarios
//! - `florcart money` - Parse price text the way the cart checks do

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{Command, MoneyArgs, RunArgs};
pub use enums::ScenarioSelection;

/// florcart - end-to-end cart checks for a live storefront
#[derive(Parser, Debug)]
#[command(
    name = "florcart",
    version,
    about = "End-to-end cart checks for a live storefront",
    long_about = "florcart drives headless Chrome through a WooCommerce storefront:\n\
                  it opens categories, adds products to the cart, and checks that the\n\
                  cart lists the right products with a matching subtotal."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Also honoured through the `NO_COLOR` environment variable.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
