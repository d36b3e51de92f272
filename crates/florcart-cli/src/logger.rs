//! Logging infrastructure for the florcart CLI.
//!
//! Structured logging through `tracing`. Verbosity comes from the global
//! flags, falling back to `RUST_LOG`. Logs go to stderr so command output
//! on stdout (`florcart money`) stays pipeable.
//!
//! # Example
//!
//! ```rust,no_run
//! use florcart_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!(scenario = "love", "starting");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter for `--verbose`: debug for every florcart crate.
pub const VERBOSE_FILTER: &str = "florcart_core=debug,florcart_browser=debug,florcart_cli=debug";

/// Filter for `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter when neither flag nor `RUST_LOG` is set. Chrome's DevTools chatter
/// stays off.
pub const DEFAULT_FILTER: &str = "florcart_core=info,florcart_browser=info,florcart_cli=info";

/// Initialize the tracing subscriber.
///
/// Call once at the start of the program, before any logging occurs.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug for florcart crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for florcart crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_wins_over_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_colors());

        unsafe {
            std::env::remove_var("NO_COLOR");
        }
        assert!(should_use_colors());

        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    fn test_filters_parse() {
        for directive in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }
}
