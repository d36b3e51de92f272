use crate::error::Result;
use crate::locator::{LocatorChain, LocatorStrategy, TextPattern};
use crate::page::Page;
use crate::pages::CART_URL;
use crate::storefront::Storefront;
use crate::wait::{WaitConfig, poll_until};
use florcart_core::{CartSnapshot, RawCart, count_increased, parse_count};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

const ROWS: &str = "tr.cart_item, tr.woocommerce-cart-form__cart-item";

#[derive(Serialize)]
struct CartSelectors {
    rows: LocatorChain,
    row_name: LocatorChain,
    row_price: LocatorChain,
    subtotal: LocatorChain,
    row_subtotals: LocatorChain,
    empty: LocatorChain,
}

/// The cart page, plus the header counter and mini-cart shown on every page.
#[derive(Debug, Clone, Copy)]
pub struct CartPage<'a> {
    page: &'a Page,
    storefront: &'a dyn Storefront,
    wait: WaitConfig,
}

impl<'a> CartPage<'a> {
    /// Creates the page object with the default wait.
    pub fn new(page: &'a Page, storefront: &'a dyn Storefront) -> Self {
        Self {
            page,
            storefront,
            wait: WaitConfig::default(),
        }
    }

    /// Overrides the poll interval (and default timeout) of every wait.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    fn rows() -> LocatorChain {
        LocatorChain::css(ROWS)
    }

    fn root() -> LocatorChain {
        LocatorChain::css(
            "form.woocommerce-cart-form, .woocommerce-cart-form, table.shop_table.cart, \
             table.woocommerce-cart-form__contents, .cart_totals, .cart-empty.woocommerce-info",
        )
    }

    fn remove_link() -> LocatorChain {
        LocatorChain::css(
            "tr.cart_item td.product-remove > a.remove, \
             tr.woocommerce-cart-form__cart-item td.product-remove > a.remove",
        )
    }

    fn cart_link() -> LocatorChain {
        LocatorChain::new(LocatorStrategy::role(
            "link",
            TextPattern::regex("cart|carrito|cesta|basket"),
        ))
        .or(LocatorStrategy::css(
            "a[href*=\"cart\"], a[href*=\"carrito\"], a[href*=\"basket\"]",
        ))
    }

    fn empty_state() -> LocatorChain {
        LocatorChain::css(".cart-empty")
            .or(LocatorStrategy::css(".woocommerce .return-to-shop"))
            .or(LocatorStrategy::css_with_text(
                "p",
                TextPattern::contains("Your cart is currently empty"),
            ))
            .or(LocatorStrategy::css_with_text(
                "p",
                TextPattern::contains("Tu carrito está vacío"),
            ))
            .or(LocatorStrategy::css_with_text(
                ".woocommerce-info",
                TextPattern::contains("carrito"),
            ))
    }

    fn header_counter() -> LocatorChain {
        LocatorChain::css_each(&[
            "#cart .mini-cart-items",
            ".mini-cart-items",
            ".cart-contents .count",
            ".header-cart-count",
            "[data-cart-count]",
            ".site-header-cart .count",
        ])
    }

    fn mini_cart_rows() -> LocatorChain {
        LocatorChain::css(".woocommerce-mini-cart .mini_cart_item, .mini-cart .mini_cart_item")
    }

    /// Whether the browser is on the cart: a cart-like URL or WooCommerce's
    /// cart body classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be read.
    pub async fn is_on_cart(&self) -> Result<bool> {
        if CART_URL.is_match(&self.page.url().await?) {
            return Ok(true);
        }

        let body = LocatorChain::css("body.woocommerce-cart, body.woocommerce-page");
        Ok(self.page.count(&body).await.unwrap_or(0) > 0)
    }

    /// Opens the cart unless already there, then waits for it to load.
    ///
    /// Falls back to clicking a visible cart link when `/cart/` fails to
    /// load.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no cart UI shows up.
    pub async fn open(&self) -> Result<()> {
        if self.is_on_cart().await.unwrap_or(false) {
            return self.assert_loaded().await;
        }

        if let Err(e) = self.page.navigate_to(self.storefront, "/cart/").await {
            debug!(error = %e, "direct cart navigation failed, trying a cart link");
            let link = Self::cart_link();
            if self.page.is_visible(&link).await.unwrap_or(false) {
                self.page.click_and_settle(&link, self.wait).await?;
            }
        }

        self.assert_loaded().await
    }

    /// Waits up to 10 s for the cart form, totals, or empty-cart notice.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` naming the cart locators.
    pub async fn assert_loaded(&self) -> Result<()> {
        self.page.wait_visible(&Self::root(), self.wait.millis(10_000)).await
    }

    /// Number of line-item rows on the cart page.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn items_count(&self) -> Result<usize> {
        self.page.count(&Self::rows()).await
    }

    /// Reads every cart text in one pass over the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the inspection script fails.
    pub async fn raw_cart(&self) -> Result<RawCart> {
        let selectors = CartSelectors {
            rows: Self::rows(),
            row_name: LocatorChain::css_each(&["td.product-name a", "td.product-name"]),
            row_price: LocatorChain::css_each(&["td.product-price .amount", "td.product-price"]),
            subtotal: LocatorChain::css_each(&[".cart-subtotal .amount", ".cart-subtotal"]),
            row_subtotals: LocatorChain::css_each(&[
                "td.product-subtotal .amount",
                "td.product-subtotal bdi",
            ]),
            empty: Self::empty_state(),
        };

        self.page
            .run(
                r#"const rows = fc.resolve(args.rows).map((row) => ({
                     name: fc.text(fc.first(args.row_name, row)) || "",
                     price: fc.text(fc.first(args.row_price, row)) || "",
                   }));
                   return {
                     rows,
                     subtotal: fc.text(fc.first(args.subtotal)),
                     row_subtotals: fc.resolve(args.row_subtotals).map(fc.text),
                     empty_state_visible: fc.resolveAll(args.empty).some(fc.visible),
                   };"#,
                &selectors,
            )
            .await
    }

    /// Reads and parses the cart.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Money` if a price on the page does not parse.
    pub async fn snapshot(&self) -> Result<CartSnapshot> {
        let raw = self.raw_cart().await?;
        debug!(rows = raw.rows.len(), subtotal = ?raw.subtotal, "cart read");
        Ok(CartSnapshot::from_raw(&raw)?)
    }

    /// Removes the first line item and waits for the cart to shrink.
    ///
    /// Returns whether a removal was observed: fewer rows, or an empty-cart
    /// notice.
    ///
    /// # Errors
    ///
    /// Fails if the cart has no visible row or remove link.
    pub async fn remove_first_item(&self) -> Result<bool> {
        self.assert_loaded().await?;

        let rows = Self::rows();
        self.page.wait_visible(&rows, self.wait.millis(10_000)).await?;
        let before = self.items_count().await?;

        let remove = Self::remove_link();
        self.page.wait_visible(&remove, self.wait.millis(8_000)).await?;
        self.page.click(&remove).await?;
        info!(before, "removed first cart item");

        let page = self.page;
        let (rows, gone) = (&rows, &LocatorChain::css(".cart-empty, .return-to-shop"));
        let removed = poll_until(
            move || async move {
                page.count(rows).await.is_ok_and(|now| now < before)
                    || page.count(gone).await.is_ok_and(|n| n > 0)
            },
            self.wait.millis(10_000),
        )
        .await;

        self.page.wait_for_dom_content_loaded(self.wait).await;
        Ok(removed)
    }

    /// Whether an explicit empty-cart element is visible, waiting up to
    /// 1.5 s for one to appear.
    pub async fn is_empty_state_visible(&self) -> bool {
        let page = self.page;
        let empty = &Self::empty_state();
        poll_until(
            move || async move { page.any_visible(empty).await.unwrap_or(false) },
            self.wait.millis(1_500),
        )
        .await
    }

    /// The header cart badge, if one is visible and holds a number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn header_count(&self) -> Result<Option<u32>> {
        let counter = Self::header_counter();
        if !self.page.is_visible(&counter).await? {
            return Ok(None);
        }
        Ok(self.page.first_text(&counter).await?.as_deref().and_then(parse_count))
    }

    /// Polls the header badge until it exceeds `previous`.
    pub async fn wait_header_count_increases(&self, previous: Option<u32>, timeout: Duration) -> bool {
        let cart = *self;
        poll_until(
            move || async move { count_increased(previous, cart.header_count().await.ok().flatten()) },
            self.wait.timeout(timeout),
        )
        .await
    }

    /// Number of rows in the header mini-cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn mini_cart_items(&self) -> Result<usize> {
        self.page.count(&Self::mini_cart_rows()).await
    }

    /// Polls for any sign that an add-to-cart landed: the header badge grew,
    /// the mini-cart lists a row, or the browser is on a cart page with rows.
    pub async fn wait_until_updated(&self, previous: Option<u32>, timeout: Duration) -> bool {
        let cart = *self;
        poll_until(
            move || async move {
                if count_increased(previous, cart.header_count().await.ok().flatten()) {
                    return true;
                }
                if cart.mini_cart_items().await.is_ok_and(|n| n > 0) {
                    return true;
                }
                let on_cart_url = cart.page.url().await.is_ok_and(|url| CART_URL.is_match(&url));
                on_cart_url && cart.items_count().await.is_ok_and(|n| n > 0)
            },
            self.wait.timeout(timeout),
        )
        .await
    }
}
