//! # florcart-browser
//!
//! Headless Chrome page objects for WooCommerce-style storefronts, built on
//! chromiumoxide.
//!
//! This crate launches Chrome, navigates a [`Storefront`], and reads the raw
//! text of product cards, product pages, and carts. It never interprets
//! prices: everything it reads is handed to `florcart-core` as
//! [`LineItemText`](florcart_core::LineItemText) or
//! [`RawCart`](florcart_core::RawCart).
//!
//! ## Architecture
//!
//! - **TestBrowser**: Manages the browser process lifecycle
//! - **Page**: A browser tab with navigation, scripting, and locator queries
//! - **LocatorChain**: Ordered fallback strategies for markup we don't control
//! - **Storefront**: The site under test, resolving relative paths
//! - **WaitConfig**: Bounded poll loops, soft (`bool`) or hard (`WaitTimeout`)
//! - **pages**: `HomePage`, `CategoryPage`, `ProductPage`, `CartPage`
//!
//! ## Example Usage
//!
//! ```ignore
//! use florcart_browser::{CartPage, LiveStorefront, TestBrowser, TestBrowserConfig};
//! use florcart_core::CartReconciler;
//!
//! let shop = LiveStorefront::new("https://www.floristeriamundoflor.com/");
//! let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//! let page = browser.new_page().await?;
//!
//! let cart = CartPage::new(&page, &shop);
//! cart.open().await?;
//! let snapshot = cart.snapshot().await?;
//! assert!(CartReconciler::default().is_empty(&snapshot));
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover locator serialization, script assembly, and wait
//! loops. Tests that drive Chrome load `data:` URLs and are `#[ignore]`d;
//! run them with `cargo test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod error;
pub mod locator;
pub mod page;
pub mod pages;
pub mod storefront;
pub mod wait;

// Re-export main types for convenience
pub use browser::{TestBrowser, TestBrowserConfig};
pub use error::{BrowserError, Result};
pub use locator::{LocatorChain, LocatorStrategy, TextPattern};
pub use page::Page;
pub use pages::{CartPage, CategoryPage, HomePage, ProductPage};
pub use storefront::{LiveStorefront, Storefront};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig, poll_until, wait_for};
