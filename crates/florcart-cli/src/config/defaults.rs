use super::{BrowserSettings, Catalog, FlorcartConfig, Timeouts};
use florcart_core::{DEFAULT_SUBTOTAL_TOLERANCE, MoneyAmount};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://www.floristeriamundoflor.com/";

pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub fn default_subtotal_tolerance() -> MoneyAmount {
    DEFAULT_SUBTOTAL_TOLERANCE
}

pub fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Default for FlorcartConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser: BrowserSettings::default(),
            timeouts: Timeouts::default(),
            catalog: Catalog::default(),
            subtotal_tolerance: default_subtotal_tolerance(),
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
            args: vec!["--start-maximized".to_string()],
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            love_scenario_secs: 90,
            birthday_scenario_secs: 60,
            wait_secs: 10,
            poll_interval_ms: 100,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            love_category: "Amor".to_string(),
            birthday_category: "Cumpleaños".to_string(),
            love_indexes: vec![0, 1],
            birthday_index: 0,
        }
    }
}
