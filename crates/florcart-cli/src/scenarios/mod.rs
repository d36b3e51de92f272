//! The storefront scenarios `florcart run` executes.
//!
//! Each scenario gets a fresh Chrome process, so it starts from an empty
//! cart, and runs under its own time budget. A scenario never returns a
//! [`CliError`](crate::error::CliError): its outcome, notes, and screenshots
//! are collected into a [`ScenarioReport`] for the run summary.

mod birthday;
mod love;

use crate::config::FlorcartConfig;
use crate::ui::format_duration;
use florcart_browser::{
    BrowserError, CartPage, CategoryPage, HomePage, LiveStorefront, Page, ProductPage, TestBrowser,
};
use florcart_core::{CartError, CartReconciler, ReconciliationMismatch, UnparsableMoney};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// A storefront scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Two products from the love category, then a full cart reconciliation
    Love,
    /// One birthday product, the header counter, then an emptied cart
    Birthday,
}

impl Scenario {
    /// Short name used in logs and artifact paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Birthday => "birthday",
        }
    }

    /// Time budget for the whole scenario.
    pub fn timeout(self, config: &FlorcartConfig) -> Duration {
        Duration::from_secs(match self {
            Self::Love => config.timeouts.love_scenario_secs,
            Self::Birthday => config.timeouts.birthday_scenario_secs,
        })
    }

    async fn run(self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        match self {
            Self::Love => love::run(ctx).await,
            Self::Birthday => birthday::run(ctx).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioFailure {
    /// The browser could not do what was asked of it
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// A product card held unusable data
    #[error("product data: {0}")]
    Cart(#[from] CartError),

    /// A price on the page did not parse
    #[error(transparent)]
    Money(#[from] UnparsableMoney),

    /// The cart disagreed with the products that were added
    #[error("cart check failed: {0}")]
    Mismatch(#[from] ReconciliationMismatch),

    /// Some other observable outcome did not happen
    #[error("{0}")]
    Expectation(String),

    /// The scenario ran out of time
    #[error("timed out after {}", format_duration(*.0))]
    TimedOut(Duration),

    /// A screenshot could not be written
    #[error("cannot write {}: {source}", path.display())]
    Artifact {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Which scenario ran
    pub scenario: Scenario,
    /// Wall-clock time, browser launch included
    pub duration: Duration,
    /// Soft expectations that did not hold
    pub notes: Vec<String>,
    /// Screenshots written, in order
    pub screenshots: Vec<PathBuf>,
    /// Pass, or the failure that ended the scenario
    pub outcome: Result<(), ScenarioFailure>,
}

impl ScenarioReport {
    /// Returns true if the scenario passed.
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// What a running scenario works with.
pub(crate) struct ScenarioContext<'a> {
    page: &'a Page,
    storefront: &'a LiveStorefront,
    config: &'a FlorcartConfig,
    artifacts_dir: PathBuf,
    notes: Vec<String>,
    screenshots: Vec<PathBuf>,
}

impl<'a> ScenarioContext<'a> {
    fn new(
        scenario: Scenario,
        page: &'a Page,
        storefront: &'a LiveStorefront,
        config: &'a FlorcartConfig,
    ) -> Self {
        Self {
            page,
            storefront,
            config,
            artifacts_dir: config.artifacts_dir.join(scenario.name()),
            notes: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    fn home(&self) -> HomePage<'a> {
        HomePage::new(self.page, self.storefront).with_wait(self.config.wait())
    }

    fn category(&self) -> CategoryPage<'a> {
        CategoryPage::new(self.page).with_wait(self.config.wait())
    }

    fn product(&self) -> ProductPage<'a> {
        ProductPage::new(self.page).with_wait(self.config.wait())
    }

    fn cart(&self) -> CartPage<'a> {
        CartPage::new(self.page, self.storefront).with_wait(self.config.wait())
    }

    fn reconciler(&self) -> CartReconciler {
        self.config.reconciler()
    }

    /// Records a soft expectation that did not hold.
    fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.notes.push(message);
    }

    /// Saves a full-page screenshot as `<artifacts_dir>/<scenario>/<name>.png`.
    async fn screenshot(&mut self, name: &str) -> Result<PathBuf, ScenarioFailure> {
        let png = self.page.screenshot().await?;
        let path = self.artifacts_dir.join(format!("{name}.png"));

        let written = async {
            tokio::fs::create_dir_all(&self.artifacts_dir).await?;
            tokio::fs::write(&path, png).await
        };
        if let Err(source) = written.await {
            return Err(ScenarioFailure::Artifact { path, source });
        }

        info!(path = %path.display(), "screenshot saved");
        self.screenshots.push(path.clone());
        Ok(path)
    }
}

/// Runs one scenario in its own browser.
pub async fn run_scenario(scenario: Scenario, config: &FlorcartConfig) -> ScenarioReport {
    let started = Instant::now();
    info!(%scenario, base_url = %config.base_url, "scenario started");

    let mut report = ScenarioReport {
        scenario,
        duration: Duration::ZERO,
        notes: Vec::new(),
        screenshots: Vec::new(),
        outcome: Ok(()),
    };

    let outcome = match TestBrowser::launch(config.browser_config()).await {
        Ok(browser) => {
            let outcome = match browser.new_page().await {
                Ok(page) => drive(scenario, &page, config, &mut report).await,
                Err(err) => Err(err.into()),
            };
            if let Err(err) = browser.close().await {
                warn!(%err, "failed to close browser");
            }
            outcome
        }
        Err(err) => Err(err.into()),
    };

    report.outcome = outcome;
    report.duration = started.elapsed();
    match &report.outcome {
        Ok(()) => info!(%scenario, elapsed = ?report.duration, "scenario passed"),
        Err(err) => warn!(%scenario, %err, "scenario failed"),
    }
    report
}

async fn drive(
    scenario: Scenario,
    page: &Page,
    config: &FlorcartConfig,
    report: &mut ScenarioReport,
) -> Result<(), ScenarioFailure> {
    let storefront = config.storefront();
    let mut ctx = ScenarioContext::new(scenario, page, &storefront, config);

    let budget = scenario.timeout(config);
    let outcome = tokio::time::timeout(budget, scenario.run(&mut ctx))
        .await
        .unwrap_or_else(|_| Err(ScenarioFailure::TimedOut(budget)));

    if outcome.is_err() {
        if let Err(err) = ctx.screenshot("failure").await {
            warn!(%err, "no failure screenshot");
        }
    }

    report.notes = ctx.notes;
    report.screenshots = ctx.screenshots;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_budgets() {
        let config = FlorcartConfig::default();
        assert_eq!(Scenario::Love.to_string(), "love");
        assert_eq!(Scenario::Birthday.name(), "birthday");
        assert_eq!(Scenario::Love.timeout(&config), Duration::from_secs(90));
        assert_eq!(Scenario::Birthday.timeout(&config), Duration::from_secs(60));
    }

    #[test]
    fn test_failure_messages() {
        let timed_out = ScenarioFailure::TimedOut(Duration::from_secs(90));
        assert_eq!(timed_out.to_string(), "timed out after 1m 30s");

        let mismatch: ScenarioFailure = ReconciliationMismatch::ItemCount {
            expected: 2,
            observed: 1,
        }
        .into();
        assert_eq!(
            mismatch.to_string(),
            "cart check failed: cart holds 1 item(s), expected 2"
        );
    }
}
