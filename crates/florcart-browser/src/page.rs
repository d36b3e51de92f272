//! Page-level browser operations and navigation.
//!
//! This module provides the Page type, which represents a browser tab and
//! exposes navigation, script execution, waiting, and locator-chain queries
//! used by the page objects.

use crate::error::{BrowserError, Result};
use crate::locator::{LOCATE_SCRIPT, LocatorChain};
use crate::storefront::Storefront;
use crate::wait::{WaitConfig, poll_until, wait_for_result};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::{Page as ChromePage, ScreenshotParams};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Serialize)]
struct ChainArgs<'a> {
    chain: &'a LocatorChain,
}

/// A browser tab.
///
/// Wraps `chromiumoxide::page::Page` with storefront-relative navigation,
/// typed script evaluation, and [`LocatorChain`] queries.
#[derive(Debug)]
pub struct Page {
    inner: ChromePage,
}

impl Page {
    pub(crate) fn new(page: ChromePage) -> Self {
        Self { inner: page }
    }

    /// Navigates to an absolute URL and waits for the load event.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load or times out.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await
    }

    /// Navigates to a storefront-relative path.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check or navigation fails.
    pub async fn navigate_to(&self, storefront: &dyn Storefront, path: &str) -> Result<()> {
        storefront.health_check().await?;

        let url = storefront.url(path);
        self.navigate(&url).await
    }

    /// Waits until `document.readyState` is `"complete"`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the page never finishes loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            move || async move {
                let state: String = self.evaluate("document.readyState").await?;
                Ok(state == "complete")
            },
            config,
            "document ready",
        )
        .await
    }

    /// Waits until the DOM is parsed (`readyState` past `"loading"`).
    ///
    /// Soft: returns false on timeout.
    pub async fn wait_for_dom_content_loaded(&self, config: WaitConfig) -> bool {
        poll_until(
            move || async move {
                self.evaluate::<String>("document.readyState")
                    .await
                    .is_ok_and(|state| state != "loading")
            },
            config,
        )
        .await
    }

    /// Waits for a navigation the page started on its own (a click, a form
    /// submit) to finish.
    ///
    /// Soft: returns false if no navigation completed within `timeout`.
    pub async fn wait_for_navigation(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.inner.wait_for_navigation()).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                trace!(error = %e, "navigation wait failed");
                false
            }
            Err(_) => false,
        }
    }

    /// Evaluates a JavaScript expression and deserializes its value.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title: String = page.evaluate("document.title").await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be
    /// deserialized.
    pub async fn evaluate<T>(&self, expression: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let params = EvaluateParams::builder()
            .expression(expression)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(BrowserError::ScriptExecutionFailed)?;

        let result = self
            .inner
            .evaluate_expression(params)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Runs a script body with the locator helper installed.
    ///
    /// The body sees `fc` (the helper namespace) and `args` (the
    /// JSON-serialized `args` value) and must `return` a JSON-serializable
    /// value. Arguments are embedded as JSON literals, never spliced in as
    /// source text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, execution, or deserialization fails.
    pub async fn run<T, A>(&self, body: &str, args: &A) -> Result<T>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        let script = helper_script(body, &serde_json::to_string(args)?);
        let encoded: String = self.evaluate(&script).await?;
        Ok(serde_json::from_str(&encoded)?)
    }

    /// Number of elements the chain resolves to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn count(&self, chain: &LocatorChain) -> Result<usize> {
        self.run("return fc.resolve(args.chain).length;", &ChainArgs { chain })
            .await
    }

    /// Normalized text of the first resolved element, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn first_text(&self, chain: &LocatorChain) -> Result<Option<String>> {
        self.run("return fc.text(fc.first(args.chain));", &ChainArgs { chain })
            .await
    }

    /// Normalized text of every resolved element.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn texts(&self, chain: &LocatorChain) -> Result<Vec<String>> {
        self.run("return fc.resolve(args.chain).map(fc.text);", &ChainArgs { chain })
            .await
    }

    /// Whether the first resolved element is rendered and visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn is_visible(&self, chain: &LocatorChain) -> Result<bool> {
        self.run("return fc.visible(fc.first(args.chain));", &ChainArgs { chain })
            .await
    }

    /// Whether any element matched by any strategy is visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn any_visible(&self, chain: &LocatorChain) -> Result<bool> {
        self.run("return fc.resolveAll(args.chain).some(fc.visible);", &ChainArgs { chain })
            .await
    }

    /// Whether the first resolved element accepts input; `None` if nothing
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the query script fails.
    pub async fn is_enabled(&self, chain: &LocatorChain) -> Result<Option<bool>> {
        self.run(
            r#"const el = fc.first(args.chain);
               if (!el) return null;
               return !(el.disabled || el.getAttribute("aria-disabled") === "true");"#,
            &ChainArgs { chain },
        )
        .await
    }

    /// Waits for the chain's first element to become visible.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` naming the chain if it never shows up.
    pub async fn wait_visible(&self, chain: &LocatorChain, config: WaitConfig) -> Result<()> {
        wait_for_result(
            move || self.is_visible(chain),
            config,
            &format!("visible {chain}"),
        )
        .await
    }

    /// Like [`wait_visible`](Self::wait_visible) but soft: false on timeout.
    pub async fn poll_visible(&self, chain: &LocatorChain, config: WaitConfig) -> bool {
        poll_until(
            move || async move { self.is_visible(chain).await.unwrap_or(false) },
            config,
        )
        .await
    }

    /// Scrolls the first resolved element into view and clicks it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the chain resolves to nothing.
    pub async fn click(&self, chain: &LocatorChain) -> Result<()> {
        debug!(%chain, "click");
        let clicked: bool = self
            .run(
                r#"const el = fc.first(args.chain);
                   if (!el) return false;
                   el.scrollIntoView({ block: "center" });
                   el.click();
                   return true;"#,
                &ChainArgs { chain },
            )
            .await?;

        if clicked {
            Ok(())
        } else {
            Err(BrowserError::not_found(chain))
        }
    }

    /// Clicks and then waits (softly) for any resulting navigation and for
    /// the new document to be parsed.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the chain resolves to nothing.
    pub async fn click_and_settle(&self, chain: &LocatorChain, config: WaitConfig) -> Result<()> {
        self.click(chain).await?;
        self.settle(config).await;
        Ok(())
    }

    /// Waits softly for a pending navigation and for the DOM to be parsed.
    /// Used after clicks performed inside page scripts.
    pub async fn settle(&self, config: WaitConfig) {
        if !self.wait_for_navigation(config.timeout).await {
            trace!("no navigation finished");
        }
        self.wait_for_dom_content_loaded(config).await;
    }

    /// Scrolls the first resolved element into view. Returns whether
    /// anything resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the script fails.
    pub async fn scroll_into_view(&self, chain: &LocatorChain) -> Result<bool> {
        self.run(
            r#"const el = fc.first(args.chain);
               if (el) el.scrollIntoView({ block: "center" });
               return !!el;"#,
            &ChainArgs { chain },
        )
        .await
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Captures a full-page PNG screenshot.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(self) -> Result<()> {
        self.inner.close().await?;
        Ok(())
    }
}

/// Wraps a script body so it runs with the helper installed and always
/// returns a JSON string (CDP drops `null` values otherwise).
fn helper_script(body: &str, args_json: &str) -> String {
    format!(
        "(() => {{\n{LOCATE_SCRIPT}\nconst fc = window.__florcart;\nconst args = {args_json};\n\
         const result = (() => {{\n{body}\n}})();\n\
         return JSON.stringify(result === undefined ? null : result);\n}})()"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{LocatorStrategy, TextPattern};

    #[test]
    fn helper_script_embeds_args_as_json() {
        let chain = LocatorChain::css("a[href*=\"cart\"]")
            .or(LocatorStrategy::text(TextPattern::contains("'); alert('x');//")));
        let args = serde_json::to_string(&ChainArgs { chain: &chain }).unwrap();

        let script = helper_script("return fc.resolve(args.chain).length;", &args);

        assert!(script.contains(&format!("const args = {args};")));
        assert!(script.contains(r#""selector":"a[href*=\"cart\"]""#));
        assert!(script.contains("window.__florcart"));
        assert!(script.ends_with("})()"));
    }

    #[test]
    fn helper_script_always_stringifies() {
        let script = helper_script("return null;", "{}");
        assert!(script.contains("JSON.stringify(result === undefined ? null : result)"));
    }
}
