//! One product from the birthday category, then an emptied cart.

use super::{ScenarioContext, ScenarioFailure};
use std::time::Duration;
use tracing::{debug, info};

/// How long the header badge, mini-cart, or cart page gets to reflect an add.
const CART_UPDATE_TIMEOUT: Duration = Duration::from_secs(6);

pub(super) async fn run(ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
    let config = ctx.config;
    let catalog = &config.catalog;

    let home = ctx.home();
    home.goto().await?;
    home.open_category(&catalog.birthday_category).await?;

    let category = ctx.category();
    category.expect_loaded().await?;

    let cart = ctx.cart();
    // an unreadable badge is the same as no badge
    let before = cart.header_count().await.ok().flatten();
    debug!(?before, "header count before adding");

    let card = category.card(catalog.birthday_index).await?;
    info!(product = %card.name, price = %card.price, "picked product");
    category.open_product(catalog.birthday_index).await?;

    let product = ctx.product();
    product.add_to_cart().await?;
    if product.keep_shopping_if_modal().await {
        debug!("dismissed added-to-cart modal");
    }
    if !cart.wait_until_updated(before, CART_UPDATE_TIMEOUT).await {
        return Err(ScenarioFailure::Expectation(format!(
            "cart did not update within {}s after adding {:?}",
            CART_UPDATE_TIMEOUT.as_secs(),
            card.name
        )));
    }

    cart.open().await?;
    cart.assert_loaded().await?;
    ctx.screenshot("cart-before").await?;

    if !cart.remove_first_item().await? {
        ctx.note("cart did not visibly shrink after removing the first item");
    }
    ctx.screenshot("cart-after").await?;

    let snapshot = cart.snapshot().await?;
    let empty_notice = snapshot.empty_state_visible || cart.is_empty_state_visible().await;
    let snapshot = snapshot.with_empty_state(empty_notice);

    if !ctx.reconciler().is_empty(&snapshot) {
        return Err(ScenarioFailure::Expectation(format!(
            "cart still holds {} item(s) after removal, subtotal {}",
            snapshot.rows.len(),
            snapshot.subtotal
        )));
    }

    info!("cart emptied");
    Ok(())
}
