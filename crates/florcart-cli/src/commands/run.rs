//! `florcart run`: load configuration, run the selected scenarios in order,
//! and report.

use crate::cli::RunArgs;
use crate::config::{CliOverrides, FlorcartConfig};
use crate::error::{CliError, Result};
use crate::scenarios::run_scenario;
use crate::ui::{self, Spinner};
use tracing::debug;

/// Execute the run command.
///
/// # Errors
///
/// Returns a configuration error before any browser starts, or
/// [`CliError::ScenariosFailed`] once every selected scenario has run.
pub async fn execute(args: RunArgs, quiet: bool) -> Result<()> {
    let config = FlorcartConfig::load(args.config.as_deref(), &CliOverrides::from(&args))?;
    debug!(?config, "configuration loaded");

    let scenarios = args.scenario.scenarios();
    if !quiet {
        ui::info(&format!(
            "Running {} scenario(s) against {}",
            scenarios.len(),
            config.base_url
        ));
    }

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let spinner = Spinner::new(&format!("{scenario}: running"), quiet);
        let report = run_scenario(scenario, &config).await;
        match &report.outcome {
            Ok(()) => spinner.finish(&format!("{scenario} passed")),
            Err(err) => spinner.fail(&format!("{scenario} failed: {err}")),
        }
        if !quiet && report.passed() && !report.notes.is_empty() {
            ui::warning(&format!(
                "{scenario} passed with {} soft check(s) not met",
                report.notes.len()
            ));
        }
        reports.push(report);
    }

    if !quiet {
        ui::print_run_summary(&reports);
    }

    let failed = reports.iter().filter(|report| !report.passed()).count();
    if failed > 0 {
        return Err(CliError::ScenariosFailed {
            failed,
            total: reports.len(),
        });
    }

    if !quiet {
        ui::success("All scenarios passed");
    }
    Ok(())
}
