use crate::error::{BrowserError, Result};
use crate::locator::{LocatorChain, LocatorStrategy, TextPattern};
use crate::page::Page;
use crate::pages::price_chain;
use crate::wait::WaitConfig;
use florcart_core::LineItemText;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Option labels that mean "price, low to high" in the storefront's
/// languages.
const SORT_LABELS: &[&str] = &[
    "low.*high",
    "price.*asc",
    "precio.*asc",
    "bajo.*alto",
    "menor.*mayor",
];

/// Option values tried when no label matched.
const SORT_VALUE: &str = r"price.*asc|asc(?!.*desc)|low|precio.*asc";

#[derive(Serialize)]
struct SortArgs<'a> {
    select: &'a LocatorChain,
    labels: Vec<TextPattern>,
    value: TextPattern,
}

/// Reads name and price inside one card.
#[derive(Serialize)]
struct CardTextArgs<'a> {
    grid: &'a LocatorChain,
    index: usize,
    name: &'a LocatorChain,
    price: &'a LocatorChain,
}

/// Finds the product link inside one card.
#[derive(Serialize)]
struct CardLinkArgs<'a> {
    grid: &'a LocatorChain,
    index: usize,
    link: &'a LocatorChain,
}

/// How the sort option was chosen.
#[derive(Debug, Clone, Deserialize)]
struct SortChoice {
    value: String,
    by_label: bool,
}

/// A product listing (category, tag, or search results).
#[derive(Debug, Clone, Copy)]
pub struct CategoryPage<'a> {
    page: &'a Page,
    wait: WaitConfig,
}

impl<'a> CategoryPage<'a> {
    /// Creates the page object with the default wait.
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            wait: WaitConfig::default(),
        }
    }

    /// Overrides the wait used for visibility checks.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Product cards: anything in the grid that has a link or a heading.
    fn grid() -> LocatorChain {
        let has = "a, h2, h3";
        LocatorChain::new(LocatorStrategy::css_has(".products .product", has))
            .or(LocatorStrategy::css_has("ul.products > li", has))
            .or(LocatorStrategy::css_has("article", has))
    }

    fn order_select() -> LocatorChain {
        LocatorChain::css("select.orderby").or(LocatorStrategy::any_role("combobox"))
    }

    fn card_name() -> LocatorChain {
        LocatorChain::new(LocatorStrategy::any_role("heading"))
            .or(LocatorStrategy::css("h2, h3, .woocommerce-loop-product__title"))
    }

    fn card_link() -> LocatorChain {
        LocatorChain::new(LocatorStrategy::any_role("link")).or(LocatorStrategy::css("a"))
    }

    /// Waits for the first product card.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no card becomes visible.
    pub async fn expect_loaded(&self) -> Result<()> {
        self.page.wait_visible(&Self::grid(), self.wait).await
    }

    /// Picks the "price: low to high" ordering.
    ///
    /// Option labels are matched first, then option values. Returns whether
    /// an option was selected; a listing without a matching option is
    /// reported, not failed.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the ordering control never shows up.
    pub async fn sort_by_price_low_to_high(&self) -> Result<bool> {
        let select = Self::order_select();
        self.page.wait_visible(&select, self.wait).await?;

        let args = SortArgs {
            select: &select,
            labels: SORT_LABELS.iter().copied().map(TextPattern::regex).collect(),
            value: TextPattern::regex(SORT_VALUE),
        };

        let choice: Option<SortChoice> = self
            .page
            .run(
                r#"const select = fc.first(args.select);
                   if (!select || !select.options) return null;
                   const options = Array.from(select.options);
                   const pick = (opt, byLabel) => {
                     select.value = opt.value;
                     select.dispatchEvent(new Event("change", { bubbles: true }));
                     return { value: opt.value, by_label: byLabel };
                   };
                   for (const p of args.labels) {
                     const opt = options.find((o) => fc.test(p, fc.norm(o.textContent)));
                     if (opt) return pick(opt, true);
                   }
                   const opt = options.find((o) => fc.test(args.value, o.value || ""));
                   return opt ? pick(opt, false) : null;"#,
                &args,
            )
            .await?;

        match choice {
            Some(choice) => {
                debug!(value = %choice.value, by_label = choice.by_label, "sorted by price");
                self.page.settle(self.wait).await;
                Ok(true)
            }
            None => {
                warn!("could not select sort by price: low to high");
                Ok(false)
            }
        }
    }

    /// Reads the name and price text of the card at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the grid has fewer cards.
    pub async fn card(&self, index: usize) -> Result<LineItemText> {
        let (grid, name, price) = (Self::grid(), Self::card_name(), price_chain());
        self.page.wait_visible(&grid, self.wait).await?;

        let card: Option<LineItemText> = self
            .page
            .run(
                r#"const card = fc.resolve(args.grid)[args.index];
                   if (!card) return null;
                   return {
                     name: fc.text(fc.first(args.name, card)) || "",
                     price: fc.text(fc.first(args.price, card)) || "",
                   };"#,
                &CardTextArgs {
                    grid: &grid,
                    index,
                    name: &name,
                    price: &price,
                },
            )
            .await?;

        card.ok_or_else(|| BrowserError::not_found(&format!("card #{index} of {grid}")))
    }

    /// Follows the product link of the card at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the card or its link is missing.
    pub async fn open_product(&self, index: usize) -> Result<()> {
        let (grid, link) = (Self::grid(), Self::card_link());
        self.page.wait_visible(&grid, self.wait).await?;

        let clicked: bool = self
            .page
            .run(
                r#"const card = fc.resolve(args.grid)[args.index];
                   const link = card ? fc.first(args.link, card) : null;
                   if (!link) return false;
                   link.scrollIntoView({ block: "center" });
                   link.click();
                   return true;"#,
                &CardLinkArgs {
                    grid: &grid,
                    index,
                    link: &link,
                },
            )
            .await?;

        if !clicked {
            return Err(BrowserError::not_found(&format!("link in card #{index} of {grid}")));
        }

        self.page.settle(self.wait).await;
        Ok(())
    }
}
