//! The storefront under test.
//!
//! Page objects never hard-code hosts. They navigate to paths (`/`,
//! `/cart/`) relative to a [`Storefront`], which knows the base URL and can
//! refuse navigation early when the site is unreachable.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// A storefront reachable over HTTP.
///
/// The trait is object-safe, so page objects hold a `&dyn Storefront`.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Returns the base URL (e.g., `https://www.floristeriamundoflor.com/`).
    fn base_url(&self) -> &str;

    /// Checks that the storefront is reachable before navigating.
    ///
    /// The default implementation assumes it is.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Returns a full URL by joining a path to the base URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// storefront.url("/cart/") // "https://shop.example/cart/"
    /// ```
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl<'a> fmt::Debug for dyn Storefront + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// A live storefront at a fixed URL, not managed by the harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStorefront {
    base_url: String,
}

impl LiveStorefront {
    /// Creates a storefront handle for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Storefront for LiveStorefront {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}
