//! Configuration for florcart runs with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and a TOML file.
//! Priority: CLI > Environment (`FLORCART_*`) > File > Defaults
//!
//! ```toml
//! base_url = "https://www.floristeriamundoflor.com/"
//! subtotal_tolerance = "0.5"
//!
//! [browser]
//! headless = false
//!
//! [catalog]
//! love_category = "Amor"
//! love_indexes = [0, 1]
//! ```

mod defaults;
mod loading;
mod tests;
mod validation;

use florcart_browser::{LiveStorefront, TestBrowserConfig, WaitConfig};
use florcart_core::{CartReconciler, MoneyAmount};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::*;
pub use loading::{CliOverrides, DEFAULT_CONFIG_FILE, ENV_PREFIX};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlorcartConfig {
    /// Storefront base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chrome launch settings
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Scenario and wait timeouts
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Which categories and products the scenarios use
    #[serde(default)]
    pub catalog: Catalog,

    /// Largest subtotal difference still accepted (exclusive)
    #[serde(default = "default_subtotal_tolerance")]
    pub subtotal_tolerance: MoneyAmount,

    /// Where screenshots are written
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

/// Chrome launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserSettings {
    /// Run without a window
    pub headless: bool,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Chrome executable (auto-detected when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,
    /// Extra Chrome arguments
    pub args: Vec<String>,
}

/// Timeouts, in whole seconds unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timeouts {
    /// Budget for the whole love scenario
    pub love_scenario_secs: u64,
    /// Budget for the whole birthday scenario
    pub birthday_scenario_secs: u64,
    /// Default wait for an element or a page load
    pub wait_secs: u64,
    /// Poll interval of every wait, in milliseconds
    pub poll_interval_ms: u64,
}

/// Categories and product positions used by the scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    /// Navigation label of the love category
    pub love_category: String,
    /// Navigation label of the birthday category
    pub birthday_category: String,
    /// Card positions (0-based, after sorting) of the two love products
    pub love_indexes: Vec<usize>,
    /// Card position of the birthday product
    pub birthday_index: usize,
}

impl FlorcartConfig {
    /// Launch settings for the browser harness.
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config = TestBrowserConfig::new()
            .with_window_size(self.browser.window_width, self.browser.window_height)
            .with_args(self.browser.args.iter().cloned());
        if !self.browser.headless {
            config = config.visible();
        }
        if let Some(path) = &self.browser.chrome_path {
            config = config.with_chrome_path(path);
        }
        config
    }

    /// Default wait for page objects.
    pub fn wait(&self) -> WaitConfig {
        WaitConfig::new(
            Duration::from_secs(self.timeouts.wait_secs),
            Duration::from_millis(self.timeouts.poll_interval_ms),
        )
    }

    /// Reconciler using the configured tolerance.
    pub fn reconciler(&self) -> CartReconciler {
        CartReconciler::new(self.subtotal_tolerance)
    }

    /// The storefront under test.
    pub fn storefront(&self) -> LiveStorefront {
        LiveStorefront::new(self.base_url.clone())
    }
}
