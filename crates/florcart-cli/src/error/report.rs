//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert `CliError` to a miette `Report`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Browser(e) => miette::miette!(
            help = "Is Chrome or Chromium installed? Set browser.chrome_path to point at it.",
            "Browser error: {e}"
        ),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => {
            miette::miette!(help = hint, "Invalid value for '{field}': {value}")
        }
        ConfigError::MissingField { field, hint } => {
            miette::miette!(help = hint, "Missing required field: {field}")
        }
        _ => miette::miette!("Configuration error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_keeps_hint_as_help() {
        let report = cli_error_to_miette(
            ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: "ftp://shop".to_string(),
                hint: "Use an http:// or https:// URL".to_string(),
            }
            .into(),
        );

        assert!(report.to_string().contains("base_url"));
        assert_eq!(
            report.help().map(|h| h.to_string()).as_deref(),
            Some("Use an http:// or https:// URL")
        );
    }

    #[test]
    fn test_scenario_failure_is_plain() {
        let report = cli_error_to_miette(CliError::ScenariosFailed { failed: 2, total: 2 });
        assert_eq!(report.to_string(), "2 of 2 scenario(s) failed");
    }
}
