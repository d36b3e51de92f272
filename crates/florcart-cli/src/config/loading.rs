use crate::cli::RunArgs;
use crate::config::FlorcartConfig;
use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "florcart.toml";

/// Prefix of configuration environment variables. Nested keys are joined
/// with `__`, e.g. `FLORCART_BROWSER__HEADLESS=false`.
pub const ENV_PREFIX: &str = "FLORCART_";

/// Settings given on the command line, applied over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--artifacts-dir`
    pub artifacts_dir: Option<PathBuf>,
    /// `--visible`
    pub visible: bool,
}

impl From<&RunArgs> for CliOverrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            artifacts_dir: args.artifacts_dir.clone(),
            visible: args.visible,
        }
    }
}

impl FlorcartConfig {
    /// Builds the layered configuration sources without extracting them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `config_path` is given but does not exist.
    pub fn figment(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    debug!(path = DEFAULT_CONFIG_FILE, "loading config file");
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        // FLORCART_CONFIG names the file itself, it is not a setting
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]));

        if let Some(base_url) = &overrides.base_url {
            figment = figment.merge(("base_url", base_url));
        }
        if let Some(dir) = &overrides.artifacts_dir {
            figment = figment.merge(("artifacts_dir", dir));
        }
        if overrides.visible {
            figment = figment.merge(("browser.headless", false));
        }

        Ok(figment)
    }

    /// Loads and validates configuration.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source is unreadable, a value has the
    /// wrong type, or validation fails.
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_path, overrides)?.extract()?;
        config.validate()?;
        Ok(config)
    }
}
