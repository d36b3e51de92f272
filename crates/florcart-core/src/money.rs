//! Currency text normalization.
//!
//! Storefront markup renders prices in many shapes: `"$120.000"`,
//! `"19,99 €"`, `"COP 1.234,50"`. [`parse_money`] reduces all of them to a
//! [`MoneyAmount`] with a fixed two-step heuristic:
//!
//! 1. a dot followed by exactly three digits (and then a non-digit or the end
//!    of the text) is a thousands separator and is dropped;
//! 2. the first remaining comma is the decimal separator.
//!
//! The heuristic is tuned for the comma-decimal / dot-grouping convention.
//! It is not a locale-aware parser: `"$1,234.56"` becomes `"1.234.56"` and is
//! rejected, and `"1,234"` reads as `1.234`. Both behaviors are kept on
//! purpose so results stay reproducible across runs and pages.

use crate::error::UnparsableMoney;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

/// A dot with exactly three digits after it, then a non-digit or the end.
static GROUPING_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([0-9]{3})\b").expect("grouping dot pattern"));

/// A decimal amount in the storefront's currency.
///
/// Backed by [`Decimal`], so sums of many line items never pick up binary
/// floating-point drift. Equality is numeric: `12.5` equals `12.50`.
///
/// The [`Display`](fmt::Display) form is the canonical rendering: no
/// grouping, a `.` decimal point, at least two fraction digits. A fraction
/// of exactly three digits is padded to four, otherwise the rendering would
/// read back as a thousands group.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoneyAmount(Decimal);

impl MoneyAmount {
    /// Zero in any currency.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero (of either sign).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// The value at the scale [`Display`](fmt::Display) renders it with.
    ///
    /// Near the top of the `Decimal` range the padding may not fit, in which
    /// case the normalized scale is kept.
    fn canonical(self) -> Decimal {
        // normalize() also folds -0 into 0
        let mut rendered = self.0.normalize();
        let scale = match rendered.scale() {
            0..=2 => 2,
            3 => 4,
            scale => scale,
        };
        rendered.rescale(scale);
        rendered
    }
}

impl From<Decimal> for MoneyAmount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<MoneyAmount> for Decimal {
    fn from(amount: MoneyAmount) -> Self {
        amount.0
    }
}

impl Add for MoneyAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for MoneyAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for MoneyAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyAmount> for MoneyAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for MoneyAmount {
    type Err = UnparsableMoney;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_money(s)
    }
}

/// Parses free-form currency text into a [`MoneyAmount`].
///
/// Every character other than ASCII digits, `,`, `.` and `-` is discarded
/// first, so currency symbols, codes, and whitespace never matter.
///
/// # Errors
///
/// Returns [`UnparsableMoney`] carrying `text` when nothing numeric is left
/// after normalization, or when what is left is not a single signed decimal
/// (several decimal points, stray commas or minus signs, out-of-range
/// magnitude). An amount with a three-digit fraction too large to render
/// with four fraction digits is also rejected, since its rendering would read
/// back as a thousands group.
///
/// # Example
///
/// ```
/// use florcart_core::parse_money;
///
/// assert_eq!(parse_money("$120.000").unwrap().to_string(), "120000.00");
/// assert_eq!(parse_money("19,99 €").unwrap().to_string(), "19.99");
/// assert!(parse_money("n/a").is_err());
/// ```
pub fn parse_money(text: &str) -> Result<MoneyAmount, UnparsableMoney> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized = GROUPING_DOT.replace_all(&kept, "${1}").replacen(',', ".", 1);

    to_decimal(&normalized)
        .map(MoneyAmount)
        .filter(|amount| amount.canonical().scale() != 3)
        .ok_or_else(|| UnparsableMoney::new(text))
}

/// Accepts `-?digits(.digits)?` where either side of the point may be empty
/// but not both.
fn to_decimal(normalized: &str) -> Option<Decimal> {
    let (negative, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let sign = if negative { "-" } else { "" };
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let literal = if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    };

    Decimal::from_str(&literal).ok()
}
