//! Page objects for a WooCommerce-style storefront.
//!
//! Each page object borrows a [`Page`](crate::Page) and describes its
//! elements as ordered [`LocatorChain`]s. Reads return raw text
//! ([`LineItemText`](florcart_core::LineItemText),
//! [`RawCart`](florcart_core::RawCart)); parsing and comparison belong to
//! `florcart-core`.
//!
//! Hard expectations (`expect_loaded`, `assert_loaded`, `add_to_cart`)
//! return [`BrowserError`](crate::BrowserError). Soft ones return `bool`.

mod cart;
mod category;
mod home;
mod product;

pub use cart::CartPage;
pub use category::CategoryPage;
pub use home::HomePage;
pub use product::ProductPage;

use crate::locator::LocatorChain;
use regex::Regex;
use std::sync::LazyLock;

/// URLs of the cart or checkout, in English and Spanish storefronts.
pub(crate) static CART_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)cart|carrito|basket|cesta|checkout").expect("cart URL pattern")
});

/// Price element of a product card or a product page. Sale prices render
/// the charged amount inside `<ins>`, so that is tried first.
pub(crate) fn price_chain() -> LocatorChain {
    LocatorChain::css_each(&[
        ".price ins .amount",
        ".price .amount",
        ".price",
        ".woocommerce-Price-amount",
        "[class*=\"price\"] .amount",
    ])
}
