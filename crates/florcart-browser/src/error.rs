//! Error types for browser-driven storefront operations.
//!
//! This module provides a structured error hierarchy that distinguishes between
//! the ways a check can break before the cart logic even runs: the browser
//! does not start, a page does not load, an element never shows up, or the
//! page hands back text that is not money.

use florcart_core::UnparsableMoney;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong between launching Chrome and handing page
/// text to the cart checks.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Chrome would not start. Usually it is missing or `chrome_path` is wrong.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// What was being attempted
        reason: String,
        /// Underlying launcher error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A DevTools request to an open browser failed.
    #[error("devtools connection failed: {0}")]
    ConnectionFailed(String),

    /// The storefront did not load.
    #[error("could not open '{url}': {reason}")]
    NavigationFailed {
        /// Target URL
        url: String,
        /// Reason reported by Chrome
        reason: String,
    },

    /// A hard wait ran out of time.
    #[error("gave up waiting for {condition} after {timeout:?}")]
    WaitTimeout {
        /// What was awaited
        condition: String,
        /// The full budget
        timeout: Duration,
    },

    /// A page script threw or returned nothing.
    #[error("page script failed: {0}")]
    ScriptExecutionFailed(String),

    /// No strategy of a locator chain matched anything.
    #[error("element not found: {locator}")]
    ElementNotFound {
        /// The chain that was tried, rendered for humans
        locator: String,
    },

    /// `close()` already ran.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Price text read from the page could not be parsed.
    #[error("unexpected page content: {0}")]
    Money(#[from] UnparsableMoney),

    /// Script arguments or results did not round-trip through JSON.
    #[error("script data: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw protocol error from chromiumoxide.
    #[error("cdp: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// Reaping the Chrome process failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    pub(crate) fn not_found(locator: &impl std::fmt::Display) -> Self {
        Self::ElementNotFound {
            locator: locator.to_string(),
        }
    }
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
