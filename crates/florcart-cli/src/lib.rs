//! florcart CLI - end-to-end cart checks against a live storefront.
//!
//! This crate wires `florcart-browser` page objects and `florcart-core`
//! reconciliation into the `florcart` binary.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap)
//! - [`commands`] - `run` and `money`
//! - [`config`] - Layered configuration (figment)
//! - [`scenarios`] - The love and birthday storefront scenarios
//! - [`error`] - Error types with actionable hints, rendered by miette
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Spinners, status lines, and the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use florcart_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod scenarios;
pub mod ui;

pub use config::FlorcartConfig;
pub use error::{CliError, ConfigError, Result};
pub use scenarios::{Scenario, ScenarioReport};
