//! Property tests for currency parsing.

use florcart_core::{MoneyAmount, parse_money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Renders an integer with `.` thousands separators, as peso storefronts do.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[test]
fn group_thousands_helper() {
    assert_eq!(group_thousands(7), "7");
    assert_eq!(group_thousands(1_000), "1.000");
    assert_eq!(group_thousands(1_234_567), "1.234.567");
}

proptest! {
    #[test]
    fn canonical_rendering_parses_back(mantissa in any::<i64>(), scale in 0u32..=6) {
        let amount = MoneyAmount::from(Decimal::new(mantissa, scale));
        let reparsed = parse_money(&amount.to_string());
        prop_assert_eq!(reparsed, Ok(amount));
    }

    #[test]
    fn parsing_is_idempotent_on_its_output(text in "[$€ ]{0,2}[0-9]{1,7}([.,][0-9]{1,4})?") {
        if let Ok(amount) = parse_money(&text) {
            prop_assert_eq!(parse_money(&amount.to_string()), Ok(amount));
        }
    }

    #[test]
    fn dot_grouped_pesos_parse_to_integers(value in 0u64..1_000_000_000_000) {
        let text = format!("$ {}", group_thousands(value));
        let amount = parse_money(&text).expect("grouped integer parses");
        prop_assert_eq!(amount.as_decimal(), Decimal::from(value));
    }

    #[test]
    fn comma_decimal_prices(units in 0u64..10_000_000, cents in 0u64..100) {
        let text = format!("{},{:02} €", group_thousands(units), cents);
        let amount = parse_money(&text).expect("comma-decimal parses");
        let expected = Decimal::from(units) + Decimal::new(i64::try_from(cents).unwrap(), 2);
        prop_assert_eq!(amount.as_decimal(), expected);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC*") {
        let _ = parse_money(&text);
    }

    #[test]
    fn failures_carry_the_input(text in "[a-zA-Z /]*") {
        let err = parse_money(&text).expect_err("no digits means no amount");
        prop_assert_eq!(err.text, text);
    }
}
