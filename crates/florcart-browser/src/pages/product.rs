use crate::error::{BrowserError, Result};
use crate::locator::{LocatorChain, LocatorStrategy, TextPattern};
use crate::page::Page;
use crate::pages::{CART_URL, price_chain};
use crate::wait::{WaitConfig, poll_until, wait_for_result};
use std::time::Duration;
use tracing::debug;

/// A single product page.
#[derive(Debug, Clone, Copy)]
pub struct ProductPage<'a> {
    page: &'a Page,
    wait: WaitConfig,
}

impl<'a> ProductPage<'a> {
    /// Creates the page object with the default wait.
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            wait: WaitConfig::default(),
        }
    }

    /// Overrides the poll interval (and default timeout) of every wait.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    fn title() -> LocatorChain {
        LocatorChain::css_each(&["h1.product_title", "h1", ".product-title"])
    }

    fn add_button() -> LocatorChain {
        LocatorChain::css("form.cart button.single_add_to_cart_button[name=\"add-to-cart\"]")
            .or(LocatorStrategy::css("form.cart button.single_add_to_cart_button"))
    }

    fn keep_shopping() -> LocatorChain {
        let label = TextPattern::regex(r"seguir\s*comprando|continuar|seguir");
        LocatorChain::new(LocatorStrategy::role("button", label.clone()))
            .or(LocatorStrategy::role("link", label))
            .or(LocatorStrategy::css_with_text(
                "a, button",
                TextPattern::contains("Seguir comprando"),
            ))
            .or(LocatorStrategy::css(".continue-shopping a, a.continue, .return-to-shop a"))
    }

    /// The product title text.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no title becomes visible.
    pub async fn name(&self) -> Result<String> {
        let title = Self::title();
        self.page.wait_visible(&title, self.wait).await?;
        self.page
            .first_text(&title)
            .await?
            .ok_or_else(|| BrowserError::not_found(&title))
    }

    /// The displayed price text, unparsed.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the page shows no price.
    pub async fn price(&self) -> Result<String> {
        let price = price_chain();
        self.page
            .first_text(&price)
            .await?
            .ok_or_else(|| BrowserError::not_found(&price))
    }

    /// Clicks "add to cart" once the button is visible and enabled.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the button stays hidden for 10 s or
    /// disabled for 5 s.
    pub async fn add_to_cart(&self) -> Result<()> {
        let button = Self::add_button();
        let (page, chain) = (self.page, &button);

        page.scroll_into_view(chain).await?;
        page.wait_visible(chain, self.wait.millis(10_000)).await?;

        if page.is_enabled(chain).await? == Some(false) {
            debug!("add-to-cart disabled, waiting");
            wait_for_result(
                move || async move { Ok(page.is_enabled(chain).await? == Some(true)) },
                self.wait.millis(5_000),
                "add-to-cart button enabled",
            )
            .await?;
        }

        page.click(chain).await
    }

    /// Dismisses an "added to cart" modal by choosing to keep shopping.
    ///
    /// Waits up to 2.5 s for the modal. Returns whether it was dismissed.
    pub async fn keep_shopping_if_modal(&self) -> bool {
        let cta = Self::keep_shopping();
        if !self.page.poll_visible(&cta, self.wait.millis(2_500)).await {
            return false;
        }

        match self.page.click_and_settle(&cta, self.wait).await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "keep-shopping click failed");
                false
            }
        }
    }

    /// Waits until the storefront shows the cart after an add.
    ///
    /// Evidence, in order: a cart-like URL within `timeout`, cart UI within
    /// 1.5 s, a cart heading within 1.2 s.
    pub async fn wait_until_in_cart(&self, timeout: Duration) -> bool {
        let page = self.page;

        let by_url = poll_until(
            move || async move { page.url().await.is_ok_and(|url| CART_URL.is_match(&url)) },
            self.wait.timeout(timeout),
        )
        .await;
        if by_url {
            return true;
        }

        let cart_ui = LocatorChain::css(
            ".woocommerce-cart-form, .cart_totals, .woocommerce-cart, form.woocommerce-cart-form",
        );
        if page.poll_visible(&cart_ui, self.wait.millis(1_500)).await {
            return true;
        }

        let heading = LocatorChain::new(LocatorStrategy::role(
            "heading",
            TextPattern::regex("carrito|cart|cesta|basket"),
        ));
        page.poll_visible(&heading, self.wait.millis(1_200)).await
    }
}
