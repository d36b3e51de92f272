//! Error types for money parsing and cart reconciliation.
//!
//! Parsing failures are always surfaced to the caller. An unparsable price is
//! never treated as zero, since that would hide a real mismatch further down
//! the reconciliation.

use crate::money::MoneyAmount;
use thiserror::Error;

/// No numeric value could be extracted from a piece of currency text.
///
/// Carries the original, unnormalized input for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse money from {text:?}")]
pub struct UnparsableMoney {
    /// The text exactly as it was handed to the parser.
    pub text: String,
}

impl UnparsableMoney {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Failures while building reconciliation inputs from raw page text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A price string could not be parsed.
    #[error(transparent)]
    UnparsableMoney(#[from] UnparsableMoney),

    /// An expected line item was given a blank product name.
    #[error("expected line item has an empty product name")]
    EmptyProductName,
}

/// A specialized Result type for cart operations.
pub type Result<T, E = CartError> = std::result::Result<T, E>;

/// One way in which an observed cart disagrees with what the caller expected.
///
/// The reconciler only reports these; deciding whether a mismatch fails a
/// check belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationMismatch {
    /// The cart holds a different number of rows than expected.
    #[error("cart holds {observed} item(s), expected {expected}")]
    ItemCount {
        /// Number of expected line items
        expected: usize,
        /// Number of rows seen in the cart
        observed: usize,
    },

    /// No cart row matches an expected product at its expected price.
    #[error("product {name:?} priced {price} is not in the cart")]
    MissingProduct {
        /// Expected product name (matched as a case-insensitive substring)
        name: String,
        /// Expected unit price
        price: MoneyAmount,
    },

    /// The observed subtotal is too far from the sum of expected prices.
    #[error("cart subtotal {observed} is not within {tolerance} of expected {expected}")]
    Subtotal {
        /// Sum of expected line-item prices
        expected: MoneyAmount,
        /// Subtotal read from the cart
        observed: MoneyAmount,
        /// Allowed absolute difference (exclusive)
        tolerance: MoneyAmount,
    },
}
