//! Integration tests for florcart-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked #[ignore]
//! by default. Run with: cargo test --package florcart-browser -- --ignored

use florcart_browser::{
    CartPage, CategoryPage, LiveStorefront, LocatorChain, LocatorStrategy, Page, ProductPage,
    TestBrowser, TestBrowserConfig, TextPattern, WaitConfig,
};
use florcart_core::{CartReconciler, ExpectedLineItem, LineItemText};
use rust_decimal_macros::dec;
use std::time::Duration;

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

fn quick() -> WaitConfig {
    WaitConfig::new(Duration::from_secs(3), Duration::from_millis(50))
}

fn offline_shop() -> LiveStorefront {
    LiveStorefront::new("http://127.0.0.1:9")
}

fn cart_row(name: &str, price: &str) -> String {
    format!(
        r##"<tr class="woocommerce-cart-form__cart-item cart_item">
              <td class="product-remove"><a href="#" class="remove">&times;</a></td>
              <td class="product-name"><a href="#">{name}</a></td>
              <td class="product-price"><span class="woocommerce-Price-amount amount"><bdi>{price}</bdi></span></td>
              <td class="product-quantity">1</td>
              <td class="product-subtotal"><span class="woocommerce-Price-amount amount"><bdi>{price}</bdi></span></td>
            </tr>"##
    )
}

fn cart_html(rows: &[(&str, &str)], subtotal: Option<&str>) -> String {
    let body: String = rows.iter().map(|(n, p)| cart_row(n, p)).collect();
    let totals = subtotal
        .map(|s| {
            format!(
                r#"<div class="cart_totals"><table><tr class="cart-subtotal"><th>Subtotal</th>
                   <td><span class="woocommerce-Price-amount amount">{s}</span></td></tr></table></div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
        <html><head><title>Carrito</title></head>
        <body class="woocommerce-cart woocommerce-page">
          <header class="site-header"><a class="cart-contents" href="/cart/"><span class="count">{count} items</span></a></header>
          <form class="woocommerce-cart-form"><table class="shop_table cart"><tbody>{body}</tbody></table></form>
          {totals}
          <script>
            document.querySelectorAll("a.remove").forEach((a) =>
              a.addEventListener("click", (e) => {{
                e.preventDefault();
                a.closest("tr").remove();
              }})
            );
          </script>
        </body></html>"#,
        count = rows.len(),
    )
}

const EMPTY_CART: &str = r#"<!DOCTYPE html>
<html><body class="woocommerce-cart">
  <div class="woocommerce">
    <p class="cart-empty woocommerce-info">Tu carrito está vacío.</p>
    <p class="return-to-shop"><a class="button" href="/tienda/">Volver a la tienda</a></p>
  </div>
</body></html>"#;

const CATEGORY: &str = r##"<!DOCTYPE html>
<html><body>
  <form class="woocommerce-ordering">
    <select name="orderby" class="orderby">
      <option value="menu_order">Orden predeterminado</option>
      <option value="popularity">Ordenar por popularidad</option>
      <option value="price">Ordenar por precio: bajo a alto</option>
      <option value="price-desc">Ordenar por precio: alto a bajo</option>
    </select>
  </form>
  <ul class="products">
    <li class="product"><a href="#p1"><h2 class="woocommerce-loop-product__title">Rosas Rojas x12</h2></a>
      <span class="price"><span class="woocommerce-Price-amount amount">$120.000</span></span></li>
    <li class="product"><a href="#p2"><h2 class="woocommerce-loop-product__title">Girasoles</h2></a>
      <span class="price"><del><span class="woocommerce-Price-amount amount">$95.000</span></del>
      <ins><span class="woocommerce-Price-amount amount">$85.500</span></ins></span></li>
  </ul>
</body></html>"##;

const PRODUCT: &str = r#"<!DOCTYPE html>
<html><body>
  <div class="summary">
    <h1 class="product_title entry-title">Caja de Rosas</h1>
    <p class="price"><span class="woocommerce-Price-amount amount">$150.000</span></p>
    <form class="cart">
      <button type="submit" name="add-to-cart" value="42" class="single_add_to_cart_button button" disabled>
        Añadir al carrito
      </button>
    </form>
  </div>
  <script>
    window.added = 0;
    const button = document.querySelector(".single_add_to_cart_button");
    button.addEventListener("click", (e) => { e.preventDefault(); window.added += 1; });
    setTimeout(() => { button.disabled = false; }, 300);
  </script>
</body></html>"#;

async fn open(html: &str) -> (TestBrowser, Page) {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(html)).await.expect("failed to navigate");
    (browser, page)
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_cart_snapshot_reconciles() {
    let html = cart_html(&[("Rose Bundle", "$12.00"), ("Tulip Set", "$8.50")], Some("$20.50"));
    let (browser, page) = open(&html).await;
    let shop = offline_shop();
    let cart = CartPage::new(&page, &shop).with_wait(quick());

    cart.assert_loaded().await.expect("cart should load");
    assert!(cart.is_on_cart().await.unwrap(), "cart body classes");
    assert_eq!(cart.items_count().await.unwrap(), 2);
    assert_eq!(cart.header_count().await.unwrap(), Some(2));

    let snapshot = cart.snapshot().await.expect("snapshot");
    let expected = [
        ExpectedLineItem::parse(&LineItemText::new("Rose Bundle", "$12.00")).unwrap(),
        ExpectedLineItem::parse(&LineItemText::new("Tulip Set", "$8.50")).unwrap(),
    ];

    let report = CartReconciler::default().reconcile(&expected, &snapshot);
    assert!(report.is_match(), "{report:?}");
    assert_eq!(report.observed_subtotal.as_decimal(), dec!(20.50));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_cart_subtotal_falls_back_to_rows() {
    let html = cart_html(&[("Caja de Rosas", "$150.000"), ("Girasoles", "$85.500")], None);
    let (browser, page) = open(&html).await;
    let shop = offline_shop();

    let raw = CartPage::new(&page, &shop).raw_cart().await.expect("raw cart");
    assert_eq!(raw.subtotal, None);
    assert_eq!(raw.row_subtotals, vec!["$150.000", "$85.500"]);

    let snapshot = CartPage::new(&page, &shop).snapshot().await.expect("snapshot");
    assert_eq!(snapshot.subtotal.as_decimal(), dec!(235500));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_remove_first_item() {
    let html = cart_html(&[("Rose Bundle", "$12.00")], Some("$12.00"));
    let (browser, page) = open(&html).await;
    let shop = offline_shop();
    let cart = CartPage::new(&page, &shop).with_wait(quick());

    assert!(cart.remove_first_item().await.expect("remove"));
    assert_eq!(cart.items_count().await.unwrap(), 0);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_empty_cart_signals() {
    let (browser, page) = open(EMPTY_CART).await;
    let shop = offline_shop();
    let cart = CartPage::new(&page, &shop).with_wait(quick());

    cart.assert_loaded().await.expect("empty notice counts as loaded");
    assert!(cart.is_empty_state_visible().await);
    assert_eq!(cart.header_count().await.unwrap(), None);

    let snapshot = cart.snapshot().await.expect("snapshot");
    assert!(snapshot.empty_state_visible);
    assert!(snapshot.rows.is_empty());
    assert!(CartReconciler::default().is_empty(&snapshot));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_category_cards_and_sort() {
    let (browser, page) = open(CATEGORY).await;
    let category = CategoryPage::new(&page).with_wait(quick());

    category.expect_loaded().await.expect("grid visible");

    assert_eq!(
        category.card(0).await.unwrap(),
        LineItemText::new("Rosas Rojas x12", "$120.000")
    );
    // the sale price, not the struck-through one
    assert_eq!(
        category.card(1).await.unwrap(),
        LineItemText::new("Girasoles", "$85.500")
    );
    assert!(category.card(5).await.is_err());

    assert!(category.sort_by_price_low_to_high().await.unwrap());
    let value: String = page
        .evaluate("document.querySelector('select.orderby').value")
        .await
        .unwrap();
    assert_eq!(value, "price");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_product_page_add_to_cart_waits_for_enabled() {
    let (browser, page) = open(PRODUCT).await;
    let product = ProductPage::new(&page).with_wait(quick());

    assert_eq!(product.name().await.unwrap(), "Caja de Rosas");
    assert_eq!(product.price().await.unwrap(), "$150.000");

    product.add_to_cart().await.expect("add to cart");
    let added: u32 = page.evaluate("window.added").await.unwrap();
    assert_eq!(added, 1);

    assert!(!product.keep_shopping_if_modal().await, "no modal on this page");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_locator_chain_falls_through() {
    let (browser, page) = open(CATEGORY).await;

    let chain = LocatorChain::css(".does-not-exist")
        .or(LocatorStrategy::role("heading", TextPattern::starts_with_word("Girasoles")))
        .or(LocatorStrategy::css("h2"));

    assert_eq!(page.count(&chain).await.unwrap(), 1);
    assert_eq!(page.first_text(&chain).await.unwrap().as_deref(), Some("Girasoles"));
    assert_eq!(page.texts(&LocatorChain::css("h2")).await.unwrap().len(), 2);

    let missing = LocatorChain::css(".nothing");
    assert_eq!(page.first_text(&missing).await.unwrap(), None);
    assert!(page.click(&missing).await.is_err());
    assert!(!page.poll_visible(&missing, WaitConfig::default().millis(200)).await);

    browser.close().await.expect("failed to close");
}
