//! Cart snapshots and reconciliation against expected line items.
//!
//! Everything here is a point-in-time view: a [`CartSnapshot`] is rebuilt
//! from fresh page text on every inspection and never cached across
//! navigations. The [`CartReconciler`] answers questions about one snapshot
//! and never fails a check itself.

use crate::error::{CartError, ReconciliationMismatch, Result, UnparsableMoney};
use crate::money::{MoneyAmount, parse_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default subtotal tolerance: half a currency unit.
pub const DEFAULT_SUBTOTAL_TOLERANCE: MoneyAmount =
    MoneyAmount::new(Decimal::from_parts(5, 0, 0, false, 1));

/// A product name and price exactly as read from a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemText {
    /// Display name text
    pub name: String,
    /// Display price text, unparsed
    pub price: String,
}

impl LineItemText {
    /// Creates a raw line item.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

/// A product the caller expects to find in the cart.
///
/// Identity is the (name, price) pair, not a position in any list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedLineItem {
    name: String,
    price: MoneyAmount,
}

impl ExpectedLineItem {
    /// Creates an expected line item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyProductName`] if `name` is blank.
    pub fn new(name: impl Into<String>, price: MoneyAmount) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CartError::EmptyProductName);
        }
        Ok(Self { name, price })
    }

    /// Builds an expected line item from text read off a product card.
    ///
    /// # Errors
    ///
    /// Fails if the price does not parse or the name is blank.
    pub fn parse(raw: &LineItemText) -> Result<Self> {
        let price = parse_money(&raw.price)?;
        Self::new(raw.name.as_str(), price)
    }

    /// Trimmed product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expected unit price.
    #[must_use]
    pub fn price(&self) -> MoneyAmount {
        self.price
    }
}

impl TryFrom<&LineItemText> for ExpectedLineItem {
    type Error = CartError;

    fn try_from(raw: &LineItemText) -> Result<Self> {
        Self::parse(raw)
    }
}

/// One line item visible in the cart at inspection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedCartRow {
    /// Row name text, trimmed
    pub name: String,
    /// Parsed unit price
    pub price: MoneyAmount,
}

impl ObservedCartRow {
    /// Creates an observed row.
    pub fn new(name: impl Into<String>, price: MoneyAmount) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Parses a row read from the cart table.
    ///
    /// # Errors
    ///
    /// Returns [`UnparsableMoney`] if the price text does not parse.
    pub fn parse(raw: &LineItemText) -> Result<Self, UnparsableMoney> {
        Ok(Self::new(raw.name.trim(), parse_money(&raw.price)?))
    }
}

/// Everything the page-inspection layer reads off a cart page, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCart {
    /// Name and unit-price text of each cart row, in page order
    #[serde(default)]
    pub rows: Vec<LineItemText>,

    /// The cart-totals subtotal text, if the element was present
    #[serde(default)]
    pub subtotal: Option<String>,

    /// Per-row subtotal texts, used when the totals subtotal is unusable
    #[serde(default)]
    pub row_subtotals: Vec<String>,

    /// Whether an explicit "your cart is empty" element was visible
    #[serde(default)]
    pub empty_state_visible: bool,
}

/// The state of a cart at one instant.
///
/// `subtotal` is observed independently of the rows. It may legitimately
/// differ from the row sum when the storefront adds taxes, shipping, or
/// discounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    /// Rows in page order
    pub rows: Vec<ObservedCartRow>,
    /// Subtotal as displayed
    pub subtotal: MoneyAmount,
    /// Whether the page showed an explicit empty-cart signal
    pub empty_state_visible: bool,
}

impl CartSnapshot {
    /// Creates a snapshot with no empty-state signal.
    #[must_use]
    pub fn new(rows: Vec<ObservedCartRow>, subtotal: MoneyAmount) -> Self {
        Self {
            rows,
            subtotal,
            empty_state_visible: false,
        }
    }

    /// Sets the explicit empty-state signal.
    #[must_use]
    pub fn with_empty_state(mut self, visible: bool) -> Self {
        self.empty_state_visible = visible;
        self
    }

    /// Converts raw cart text into a snapshot.
    ///
    /// The subtotal is taken from the totals text when it parses to a
    /// non-zero amount. Otherwise (missing, unparsable, or zero) it falls
    /// back to the sum of the per-row subtotals, which is zero for a cart
    /// without rows.
    ///
    /// # Errors
    ///
    /// Returns [`UnparsableMoney`] if a row price or a per-row subtotal used
    /// by the fallback does not parse.
    pub fn from_raw(raw: &RawCart) -> Result<Self, UnparsableMoney> {
        let rows = raw
            .rows
            .iter()
            .map(ObservedCartRow::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = match raw.subtotal.as_deref().map(parse_money) {
            Some(Ok(amount)) if !amount.is_zero() => amount,
            totals => {
                debug!(
                    ?totals,
                    rows = raw.row_subtotals.len(),
                    "cart totals subtotal unusable, summing row subtotals"
                );
                raw.row_subtotals
                    .iter()
                    .map(|text| parse_money(text))
                    .sum::<Result<MoneyAmount, _>>()?
            }
        };

        Ok(Self {
            rows,
            subtotal,
            empty_state_visible: raw.empty_state_visible,
        })
    }
}

/// Compares observed carts against expectations.
///
/// Holds only the subtotal tolerance; every method is a pure function of
/// its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartReconciler {
    tolerance: MoneyAmount,
}

impl CartReconciler {
    /// Creates a reconciler with a custom subtotal tolerance.
    #[must_use]
    pub fn new(tolerance: MoneyAmount) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    /// The allowed absolute subtotal difference (exclusive).
    #[must_use]
    pub fn tolerance(&self) -> MoneyAmount {
        self.tolerance
    }

    /// Number of observed rows.
    #[must_use]
    pub fn items_count(&self, snapshot: &CartSnapshot) -> usize {
        snapshot.rows.len()
    }

    /// Returns true if some row's name contains `name` (case-insensitively)
    /// and its price equals `expected_price` exactly.
    #[must_use]
    pub fn contains_product(
        &self,
        snapshot: &CartSnapshot,
        name: &str,
        expected_price: MoneyAmount,
    ) -> bool {
        let needle = name.trim().to_lowercase();
        snapshot
            .rows
            .iter()
            .any(|row| row.name.to_lowercase().contains(&needle) && row.price == expected_price)
    }

    /// [`contains_product`](Self::contains_product) for an expected item.
    #[must_use]
    pub fn contains_item(&self, snapshot: &CartSnapshot, item: &ExpectedLineItem) -> bool {
        self.contains_product(snapshot, item.name(), item.price())
    }

    /// Sums the parsed prices of raw line items.
    ///
    /// # Errors
    ///
    /// Returns the first [`UnparsableMoney`] encountered.
    pub fn compute_expected_subtotal(
        &self,
        items: &[LineItemText],
    ) -> Result<MoneyAmount, UnparsableMoney> {
        items.iter().map(|item| parse_money(&item.price)).sum()
    }

    /// Returns true if `observed` lies strictly within the tolerance of
    /// `expected`.
    #[must_use]
    pub fn subtotal_matches(&self, expected: MoneyAmount, observed: MoneyAmount) -> bool {
        (expected - observed).abs() < self.tolerance
    }

    /// Returns true if any one of the three empty signals is present: no
    /// rows, a zero subtotal, or a visible empty-state element.
    #[must_use]
    pub fn is_empty(&self, snapshot: &CartSnapshot) -> bool {
        self.items_count(snapshot) == 0
            || snapshot.subtotal.is_zero()
            || snapshot.empty_state_visible
    }

    /// Checks a snapshot against the full expected contents of the cart.
    ///
    /// Never fails: every disagreement is collected in the returned report.
    #[must_use]
    pub fn reconcile(&self, expected: &[ExpectedLineItem], snapshot: &CartSnapshot) -> Reconciliation {
        let mut mismatches = Vec::new();

        let observed_count = self.items_count(snapshot);
        if observed_count != expected.len() {
            mismatches.push(ReconciliationMismatch::ItemCount {
                expected: expected.len(),
                observed: observed_count,
            });
        }

        for item in expected {
            if !self.contains_item(snapshot, item) {
                mismatches.push(ReconciliationMismatch::MissingProduct {
                    name: item.name().to_string(),
                    price: item.price(),
                });
            }
        }

        let expected_subtotal: MoneyAmount = expected.iter().map(ExpectedLineItem::price).sum();
        if !self.subtotal_matches(expected_subtotal, snapshot.subtotal) {
            mismatches.push(ReconciliationMismatch::Subtotal {
                expected: expected_subtotal,
                observed: snapshot.subtotal,
                tolerance: self.tolerance,
            });
        }

        Reconciliation {
            items_count: observed_count,
            expected_subtotal,
            observed_subtotal: snapshot.subtotal,
            mismatches,
        }
    }
}

impl Default for CartReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_SUBTOTAL_TOLERANCE)
    }
}

/// Outcome of [`CartReconciler::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Rows seen in the cart
    pub items_count: usize,
    /// Sum of expected prices
    pub expected_subtotal: MoneyAmount,
    /// Subtotal read from the cart
    pub observed_subtotal: MoneyAmount,
    /// Every disagreement found, in check order
    pub mismatches: Vec<ReconciliationMismatch>,
}

impl Reconciliation {
    /// Returns true if no mismatch was found.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Turns the report into a verdict, failing with the first mismatch.
    ///
    /// # Errors
    ///
    /// Returns the first recorded [`ReconciliationMismatch`].
    pub fn into_result(self) -> Result<Self, ReconciliationMismatch> {
        match self.mismatches.first() {
            Some(first) => Err(first.clone()),
            None => Ok(self),
        }
    }
}

/// Reads an item counter such as a header cart badge.
///
/// Keeps only the ASCII digits of `text`; returns `None` when there are
/// none or the number does not fit.
#[must_use]
pub fn parse_count(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Returns true when a counter reading shows the cart grew.
///
/// With no previous reading, any positive current count counts as growth.
#[must_use]
pub fn count_increased(previous: Option<u32>, current: Option<u32>) -> bool {
    match (previous, current) {
        (_, None) => false,
        (None, Some(now)) => now > 0,
        (Some(before), Some(now)) => now > before,
    }
}
