use crate::error::Result;
use crate::locator::{LocatorChain, LocatorStrategy, TextPattern};
use crate::page::Page;
use crate::storefront::Storefront;
use crate::wait::WaitConfig;
use tracing::debug;

/// The storefront landing page and its navigation menu.
#[derive(Debug, Clone, Copy)]
pub struct HomePage<'a> {
    page: &'a Page,
    storefront: &'a dyn Storefront,
    wait: WaitConfig,
}

impl<'a> HomePage<'a> {
    /// Creates the page object with the default wait.
    pub fn new(page: &'a Page, storefront: &'a dyn Storefront) -> Self {
        Self {
            page,
            storefront,
            wait: WaitConfig::default(),
        }
    }

    /// Overrides the wait used for navigation and visibility checks.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    fn header() -> LocatorChain {
        LocatorChain::css_each(&["header", "#header", ".site-header"])
    }

    fn menu_toggle() -> LocatorChain {
        LocatorChain::new(LocatorStrategy::role(
            "button",
            TextPattern::regex("menú|menu|categorías|categories"),
        ))
        .or(LocatorStrategy::css(
            ".menu-toggle, .hamburger, [aria-label*=\"menu\" i]",
        ))
    }

    /// Opens `/` and waits for the site header.
    ///
    /// # Errors
    ///
    /// Fails if navigation fails or no header becomes visible.
    pub async fn goto(&self) -> Result<()> {
        self.page.navigate_to(self.storefront, "/").await?;
        self.page.wait_visible(&Self::header(), self.wait).await
    }

    /// Follows the navigation entry for `category`.
    ///
    /// Tried in order: a visible link whose name starts with the category,
    /// the same link after opening a collapsed menu, any visible link
    /// containing the category, and finally any text containing it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when nothing on the page mentions the
    /// category.
    pub async fn open_category(&self, category: &str) -> Result<()> {
        let nav_link =
            LocatorChain::new(LocatorStrategy::role("link", TextPattern::starts_with_word(category)));

        if self.page.is_visible(&nav_link).await.unwrap_or(false) {
            return self.page.click_and_settle(&nav_link, self.wait).await;
        }

        let menu = Self::menu_toggle();
        if self.page.is_visible(&menu).await.unwrap_or(false) {
            if let Err(e) = self.page.click(&menu).await {
                debug!(error = %e, "menu toggle click failed");
            }
            if self.page.is_visible(&nav_link).await.unwrap_or(false) {
                return self.page.click_and_settle(&nav_link, self.wait).await;
            }
        }

        let tile = LocatorChain::new(LocatorStrategy::role("link", TextPattern::contains(category)));
        if self.page.is_visible(&tile).await.unwrap_or(false) {
            return self.page.click_and_settle(&tile, self.wait).await;
        }

        debug!(category, "no category link visible, clicking matching text");
        let text = LocatorChain::new(LocatorStrategy::text(TextPattern::contains(category)));
        self.page.click_and_settle(&text, self.wait).await
    }
}
