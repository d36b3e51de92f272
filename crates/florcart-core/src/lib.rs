//! # florcart-core
//!
//! Money-string normalization and cart reconciliation for storefront
//! end-to-end checks.
//!
//! Browser automation only ever hands back text. This crate turns that text
//! into numbers that can be compared and answers the questions a cart check
//! asks: how many rows, is this product at this price present, does the
//! subtotal add up, is the cart empty.
//!
//! ## Architecture
//!
//! - **`parse_money`**: Currency text to [`MoneyAmount`] with a fixed
//!   thousands/decimal separator heuristic
//! - **`CartSnapshot`**: Point-in-time view of a cart, built from raw page text
//! - **`CartReconciler`**: Pure verdicts over snapshots, with a subtotal tolerance
//!
//! Nothing here performs I/O, blocks, or keeps state between calls.
//!
//! ## Example
//!
//! ```
//! use florcart_core::{CartReconciler, CartSnapshot, LineItemText, RawCart, parse_money};
//!
//! let raw = RawCart {
//!     rows: vec![LineItemText::new("Rose Bundle", "$12.00")],
//!     subtotal: Some("$12.00".into()),
//!     ..RawCart::default()
//! };
//! let cart = CartSnapshot::from_raw(&raw)?;
//!
//! let reconciler = CartReconciler::default();
//! assert_eq!(reconciler.items_count(&cart), 1);
//! assert!(reconciler.contains_product(&cart, "rose", parse_money("12")?));
//! # Ok::<(), florcart_core::UnparsableMoney>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cart;
pub mod error;
pub mod money;

pub use cart::{
    CartReconciler, CartSnapshot, DEFAULT_SUBTOTAL_TOLERANCE, ExpectedLineItem, LineItemText,
    ObservedCartRow, RawCart, Reconciliation, count_increased, parse_count,
};
pub use error::{CartError, ReconciliationMismatch, Result, UnparsableMoney};
pub use money::{MoneyAmount, parse_money};
