//! Formatting for durations and the run summary.

use crate::scenarios::ScenarioReport;
use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use florcart_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print a table of scenario outcomes to stderr.
pub fn print_run_summary(reports: &[ScenarioReport]) {
    let width = usize::from(Term::stderr().size().1).min(80);

    eprintln!("\n{}", "Run Summary".bold().underline());
    eprintln!("{}", "─".repeat(width));

    for report in reports {
        let duration = format!("({})", format_duration(report.duration));
        match &report.outcome {
            Ok(()) => eprintln!(
                "  {} {} {}",
                "✓".green(),
                report.scenario.name().bright_white().bold(),
                duration.dimmed()
            ),
            Err(err) => {
                eprintln!(
                    "  {} {} {}",
                    "✗".red(),
                    report.scenario.name().bright_white().bold(),
                    duration.dimmed()
                );
                eprintln!("      {}", err.red());
            }
        }
        for note in &report.notes {
            eprintln!("      {} {}", "⚠".yellow(), note.dimmed());
        }
        for path in &report.screenshots {
            eprintln!("      {} {}", "▸".blue(), path.display().dimmed());
        }
    }

    eprintln!("{}", "─".repeat(width));

    let passed = reports.iter().filter(|r| r.passed()).count();
    let total_time: Duration = reports.iter().map(|r| r.duration).sum();
    let tally = format!("{passed}/{} passed", reports.len());
    eprintln!(
        "  {} {} in {}",
        "Total:".bold(),
        if passed == reports.len() {
            tally.green().to_string()
        } else {
            tally.red().to_string()
        },
        format_duration(total_time).green()
    );
}
