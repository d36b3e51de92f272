//! Browser lifecycle management and process control.
//!
//! `TestBrowser` launches Chrome, drives the DevTools handler on a tokio
//! task, and opens pages. Each launch gets a fresh user-data directory, so
//! carts and cookies never leak between runs. `close()` removes it again;
//! a dropped browser is killed by chromiumoxide but leaves the profile.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Configuration for launching a test browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBrowserConfig {
    /// No window (default). The `visible` feature overrides this.
    pub headless: bool,
    /// Width and height in pixels.
    pub window_size: (u32, u32),
    /// Extra command-line switches, appended after the defaults.
    pub args: Vec<String>,
    /// Chrome binary; chromiumoxide searches the usual locations when unset.
    pub chrome_path: Option<PathBuf>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome executable instead of auto-detection.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    fn to_browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        // chromiumoxide defaults to headless; with_head() opens a window
        if !self.headless || cfg!(feature = "visible") {
            config = config.with_head();
        }

        config = config.window_size(self.window_size.0, self.window_size.1);

        // one profile per launch: the cart always starts empty
        config = config
            .user_data_dir(profile_dir)
            .args(self.args.iter().cloned());

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable (CI containers).
                // Only ever pointed at the storefront under test.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A running Chrome with its own throwaway profile.
///
/// # Example
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("https://www.floristeriamundoflor.com/").await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    browser: Option<Browser>,
    events: JoinHandle<()>,
    profile_dir: PathBuf,
}

impl TestBrowser {
    /// Starts Chrome and the task that pumps its DevTools events.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        let profile_dir =
            std::env::temp_dir().join(format!("florcart-profile-{}", uuid::Uuid::new_v4()));
        debug!(?config, profile = %profile_dir.display(), "launching chrome");

        let (browser, mut handler) = Browser::launch(config.to_browser_config(&profile_dir)?)
            .await
            .map_err(|e| BrowserError::LaunchFailed {
                reason: "chrome did not start".to_string(),
                source: Some(Box::new(e)),
            })?;

        // pages hang unless the handler stream is polled
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("devtools event error: {e}");
                }
            }
        });

        Ok(Self {
            browser: Some(browser),
            events,
            profile_dir,
        })
    }

    /// Opens a new tab on `about:blank`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` after [`close`](Self::close) failed midway.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;
        let tab = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        Ok(Page::new(tab))
    }

    /// Shuts Chrome down, reaps the process, and deletes the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome does not acknowledge the shutdown.
    pub async fn close(mut self) -> Result<()> {
        if let Some(mut browser) = self.browser.take() {
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
            browser.wait().await?;
        }
        self.events.abort();

        if let Err(err) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            debug!(%err, "profile directory left behind");
        }
        debug!("chrome closed");
        Ok(())
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        if self.browser.is_some() {
            warn!("TestBrowser dropped without close(), chromiumoxide will kill the process");
            self.events.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builders() {
        let config = TestBrowserConfig::new()
            .visible()
            .with_window_size(1280, 800)
            .with_args(["--start-maximized".to_string()])
            .with_chrome_path("/usr/bin/chromium");

        assert!(!config.headless);
        assert_eq!(config.window_size, (1280, 800));
        assert!(config.args.contains(&"--no-sandbox".to_string()));
        assert_eq!(config.args.last().map(String::as_str), Some("--start-maximized"));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = TestBrowser::launch(TestBrowserConfig::default())
            .await
            .expect("failed to launch browser");
        let profile = browser.profile_dir.clone();

        let page = browser.new_page().await.expect("failed to open tab");
        assert_eq!(page.url().await.expect("url"), "about:blank");

        browser.close().await.expect("failed to close browser");
        assert!(!profile.exists(), "profile directory removed on close");
    }
}
