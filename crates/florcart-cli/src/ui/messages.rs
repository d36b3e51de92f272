//! One-line status messages on stderr.

use owo_colors::OwoColorize;

fn line(marker: impl std::fmt::Display, message: impl std::fmt::Display) {
    eprintln!("{marker} {message}");
}

/// A check passed.
pub fn success(message: &str) {
    line("✓".green().bold(), message);
}

/// Progress worth showing without `--verbose`.
pub fn info(message: &str) {
    line("ℹ".blue().bold(), message);
}

/// Something was off but the run goes on.
pub fn warning(message: &str) {
    line("⚠".yellow().bold(), message.yellow());
}

/// A failure the user has to act on.
///
/// ```no_run
/// use florcart_cli::ui::error;
///
/// error("\"n/a\": cannot parse money");
/// ```
pub fn error(message: &str) {
    line("✗".red().bold(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("love passed");
        info("running 2 scenarios");
        warning("sort control not found");
        error("birthday failed");
    }
}
