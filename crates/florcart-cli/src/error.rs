//! Error handling for the florcart CLI.
//!
//! `CliError` is the top-level error returned by commands. It converts from
//! configuration and browser errors via `#[from]`, and is turned
//! into a `miette` report at the binary boundary (see [`cli_error_to_miette`]).
//!
//! Scenario failures are not `CliError`s: a scenario that fails is recorded in
//! the run summary, and the run as a whole ends with
//! [`CliError::ScenariosFailed`].

mod report;

pub use report::cli_error_to_miette;

use florcart_browser::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chrome could not be launched or driven
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// One or more scenarios failed
    #[error("{failed} of {total} scenario(s) failed")]
    ScenariosFailed {
        /// Number of failed scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
    },

    /// Some `florcart money` inputs did not parse
    #[error("{count} input(s) could not be parsed as money\n\nHint: {hint}")]
    UnparsableInput {
        /// Number of rejected inputs
        count: usize,
        /// Why typical inputs fail
        hint: &'static str,
    },
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create florcart.toml or pass an existing file to --config", .0.display())]
    NotFound(PathBuf),

    /// Merged configuration failed to deserialize
    #[error("Invalid configuration: {0}\n\nHint: Check florcart.toml and FLORCART_* environment variables")]
    Invalid(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("florcart.toml"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("florcart.toml"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "catalog.love_indexes".to_string(),
            value: "[0, 0]".to_string(),
            hint: "Pick two different products".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'catalog.love_indexes'"));
        assert!(msg.contains("[0, 0]"));
        assert!(msg.contains("Hint: Pick two different products"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::Invalid("bad".to_string()).into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn test_cli_error_from_browser_error() {
        let cli_err: CliError = BrowserError::AlreadyClosed.into();
        assert!(matches!(cli_err, CliError::Browser(_)));
    }

    #[test]
    fn test_scenarios_failed_message() {
        let err = CliError::ScenariosFailed { failed: 1, total: 2 };
        assert_eq!(err.to_string(), "1 of 2 scenario(s) failed");
    }
}
