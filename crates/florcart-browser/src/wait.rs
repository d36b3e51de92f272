//! Wait conditions and strategies for browser operations.
//!
//! Storefront pages update asynchronously: the cart badge changes after an
//! AJAX call, a modal appears a moment after "add to cart", the cart table
//! re-renders after a removal. Every wait here is a bounded poll loop with an
//! explicit deadline and a fixed poll interval.
//!
//! Two flavors exist:
//!
//! - [`poll_until`] is *soft*: it returns `false` on timeout so callers can
//!   treat the outcome as one more piece of evidence.
//! - [`wait_for`] and [`wait_for_result`] are *hard*: they return
//!   [`BrowserError::WaitTimeout`].

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::trace;

/// Budget of a wait when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between two evaluations of a condition.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Deadline and cadence of a poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Total budget, measured from the first evaluation.
    pub timeout: Duration,

    /// Sleep between evaluations.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Explicit timeout and interval.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Custom timeout at the default cadence.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }

    /// Same poll interval, different timeout.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Shorthand for a timeout in milliseconds, keeping the poll interval.
    #[must_use]
    pub fn millis(self, timeout_ms: u64) -> Self {
        self.timeout(Duration::from_millis(timeout_ms))
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `condition` until it returns true or the deadline passes.
///
/// The condition is always evaluated at least once, even with a zero
/// timeout. Returns whether it was ever satisfied.
///
/// # Example
///
/// ```ignore
/// let grew = poll_until(
///     move || async move { cart.header_count().await.ok().flatten() > before },
///     WaitConfig::with_timeout(Duration::from_secs(6)),
/// )
/// .await;
/// ```
pub async fn poll_until<F, Fut>(condition: F, config: WaitConfig) -> bool
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + config.timeout;

    loop {
        if condition().await {
            return true;
        }

        if Instant::now() >= deadline {
            return false;
        }

        sleep(config.poll_interval).await;
    }
}

/// Waits for a condition to become true, with timeout.
///
/// # Errors
///
/// Returns `WaitTimeout` naming `description` if the deadline passes first.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    if poll_until(condition, config).await {
        Ok(())
    } else {
        Err(BrowserError::WaitTimeout {
            condition: description.to_string(),
            timeout: config.timeout,
        })
    }
}

/// Waits for a condition that returns a `Result<bool>`.
///
/// Errors from the condition count as "not yet" (the page may be
/// mid-navigation and briefly unable to run scripts).
///
/// # Errors
///
/// Returns `WaitTimeout` naming `description` if the deadline passes first.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    wait_for(
        || {
            let pending = condition();
            async move {
                match pending.await {
                    Ok(done) => done,
                    Err(e) => {
                        trace!(error = %e, "wait condition errored, retrying");
                        false
                    }
                }
            }
        },
        config,
        description,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(timeout_ms: u64) -> WaitConfig {
        WaitConfig::new(Duration::from_millis(timeout_ms), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn wait_for_succeeds_immediately() {
        let result = wait_for(|| async { true }, WaitConfig::default(), "test condition").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_for_succeeds_eventually() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for(
            move || {
                let c = counter_clone.clone();
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    count >= 3
                }
            },
            WaitConfig::with_timeout(Duration::from_secs(5)),
            "counter >= 3",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_for_times_out() {
        let result = wait_for(|| async { false }, quick(100), "impossible condition").await;

        match result {
            Err(BrowserError::WaitTimeout { condition, timeout }) => {
                assert_eq!(condition, "impossible condition");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_until_is_soft() {
        assert!(!poll_until(|| async { false }, quick(50)).await);
        assert!(poll_until(|| async { true }, quick(50)).await);
    }

    #[tokio::test]
    async fn poll_until_checks_once_with_zero_timeout() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let satisfied = poll_until(
            move || {
                let c = calls_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    false
                }
            },
            quick(0),
        )
        .await;

        assert!(!satisfied);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wait_for_result_retries_through_errors() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for_result(
            move || {
                let c = counter_clone.clone();
                async move {
                    match c.fetch_add(1, Ordering::SeqCst) {
                        0 => Err(BrowserError::ScriptExecutionFailed("navigating".into())),
                        1 => Ok(false),
                        _ => Ok(true),
                    }
                }
            },
            quick(1000),
            "settles after an error",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn config_builders() {
        let config = WaitConfig::default().millis(2500);
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }
}
