//! `florcart money`: parse price text exactly the way cart checks do.
//!
//! Each input prints as `<text>\t<amount>` on stdout, so the output can be
//! piped. Inputs that do not parse are reported on stderr.

use crate::cli::MoneyArgs;
use crate::error::{CliError, Result};
use crate::ui;
use florcart_core::{MoneyAmount, UnparsableMoney, parse_money};

const HINT: &str = "Prices need at least one digit, e.g. \"$19.99\", \"19,99 €\" or \"$120.000\"";

/// Parses every input, returning the successes and the failures.
pub fn parse_all(texts: &[String]) -> (Vec<(&str, MoneyAmount)>, Vec<UnparsableMoney>) {
    let mut parsed = Vec::with_capacity(texts.len());
    let mut failed = Vec::new();
    for text in texts {
        match parse_money(text) {
            Ok(amount) => parsed.push((text.as_str(), amount)),
            Err(err) => failed.push(err),
        }
    }
    (parsed, failed)
}

/// Execute the money command.
///
/// # Errors
///
/// Returns [`CliError::UnparsableInput`] if any input fails to parse. The
/// inputs that did parse are still printed.
pub fn execute(args: &MoneyArgs) -> Result<()> {
    let (parsed, failed) = parse_all(&args.texts);

    for (text, amount) in &parsed {
        println!("{text}\t{amount}");
    }
    if args.sum {
        let total: MoneyAmount = parsed.iter().map(|(_, amount)| *amount).sum();
        println!("total\t{total}");
    }

    for err in &failed {
        ui::error(&err.to_string());
    }
    if !failed.is_empty() {
        return Err(CliError::UnparsableInput {
            count: failed.len(),
            hint: HINT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_all_splits_failures() {
        let texts = ["$19.99", "n/a", "19,99 €", ""].map(String::from);
        let (parsed, failed) = parse_all(&texts);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], ("$19.99", MoneyAmount::new(dec!(19.99))));
        assert_eq!(parsed[1].1, MoneyAmount::new(dec!(19.99)));
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].text, "n/a");
    }

    #[test]
    fn test_execute_fails_on_any_bad_input() {
        let args = MoneyArgs {
            texts: vec!["$12.00".to_string(), "gratis".to_string()],
            sum: true,
        };
        assert!(matches!(
            execute(&args),
            Err(CliError::UnparsableInput { count: 1, .. })
        ));
    }
}
