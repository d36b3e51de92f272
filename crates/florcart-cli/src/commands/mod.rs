//! Command implementations for the florcart CLI.
//!
//! - [`run`] - Drive Chrome through the storefront scenarios
//! - [`money`] - Parse price text and print canonical amounts
//!
//! Each command provides an `execute` function that takes the parsed
//! command arguments and returns a Result.

pub mod money;
pub mod run;

pub use money::execute as money_execute;
pub use run::execute as run_execute;
