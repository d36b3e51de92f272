use crate::config::FlorcartConfig;
use crate::error::ConfigError;
use florcart_core::MoneyAmount;

fn invalid(field: &str, value: impl ToString, hint: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
}

/// Validate that the base URL is an absolute http(s) URL.
pub fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::MissingField {
            field: "base_url".to_string(),
            hint: "Set base_url in florcart.toml, FLORCART_BASE_URL, or --base-url".to_string(),
        });
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| invalid("base_url", url, "Use an http:// or https:// URL"))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(invalid("base_url", url, "The URL needs a host"));
    }

    Ok(())
}

/// Validate that the love scenario picks two different products.
pub fn validate_love_indexes(indexes: &[usize]) -> Result<(), ConfigError> {
    let value = format!("{indexes:?}");
    match indexes {
        [first, second] if first == second => Err(invalid(
            "catalog.love_indexes",
            value,
            "Product indexes must be distinct",
        )),
        [_, _] => Ok(()),
        _ => Err(invalid(
            "catalog.love_indexes",
            value,
            "Give exactly two product indexes, e.g. [0, 1]",
        )),
    }
}

impl FlorcartConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.base_url)?;
        validate_love_indexes(&self.catalog.love_indexes)?;

        for (field, name) in [
            ("catalog.love_category", &self.catalog.love_category),
            ("catalog.birthday_category", &self.catalog.birthday_category),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                    hint: "Use the category label shown in the storefront menu".to_string(),
                });
            }
        }

        if self.subtotal_tolerance <= MoneyAmount::ZERO {
            return Err(invalid(
                "subtotal_tolerance",
                self.subtotal_tolerance,
                "Tolerance must be positive, e.g. \"0.5\"",
            ));
        }

        let timeouts = self.timeouts;
        for (field, value) in [
            ("timeouts.love_scenario_secs", timeouts.love_scenario_secs),
            ("timeouts.birthday_scenario_secs", timeouts.birthday_scenario_secs),
            ("timeouts.wait_secs", timeouts.wait_secs),
            ("timeouts.poll_interval_ms", timeouts.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(invalid(field, value, "Timeouts must be greater than zero"));
            }
        }

        Ok(())
    }
}
