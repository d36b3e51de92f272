#[cfg(test)]
mod tests {
    use crate::config::validation::{validate_base_url, validate_love_indexes};
    use crate::config::*;
    use crate::error::ConfigError;
    use florcart_core::MoneyAmount;
    use std::time::Duration;

    #[test]
    fn test_defaults_are_valid() {
        let config = FlorcartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.browser.headless);
        assert_eq!(config.catalog.love_indexes, vec![0, 1]);
        assert_eq!(config.wait().timeout, Duration::from_secs(10));
        assert_eq!(config.wait().poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_toml_parsing() {
        let config: FlorcartConfig = toml::from_str(
            r#"
            base_url = "http://localhost:8080/"
            subtotal_tolerance = "0.25"

            [browser]
            headless = false
            args = []

            [catalog]
            love_category = "Aniversario"
            love_indexes = [2, 3]
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.subtotal_tolerance.to_string(), "0.25");
        assert!(!config.browser.headless);
        assert!(config.browser.args.is_empty());
        // untouched sections keep their defaults
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.catalog.birthday_category, "Cumpleaños");
        assert_eq!(config.timeouts, Timeouts::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(toml::from_str::<FlorcartConfig>("base_uri = \"x\"").is_err());
        assert!(toml::from_str::<FlorcartConfig>("[browser]\nheadles = true").is_err());
    }

    #[test]
    fn test_validation() {
        for url in ["", "   ", "ftp://shop.example", "shop.example", "https://", "https:///cart"] {
            assert!(validate_base_url(url).is_err(), "{url:?}");
        }
        for url in ["https://shop.example", "http://127.0.0.1:8080/", DEFAULT_BASE_URL] {
            assert!(validate_base_url(url).is_ok(), "{url:?}");
        }

        assert!(validate_love_indexes(&[0, 1]).is_ok());
        assert!(validate_love_indexes(&[4, 2]).is_ok());
        for indexes in [&[][..], &[0], &[1, 1], &[0, 1, 2]] {
            assert!(validate_love_indexes(indexes).is_err(), "{indexes:?}");
        }

        assert!(matches!(
            FlorcartConfig {
                subtotal_tolerance: MoneyAmount::ZERO,
                ..FlorcartConfig::default()
            }
            .validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "subtotal_tolerance"
        ));

        let mut config = FlorcartConfig::default();
        config.timeouts.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = FlorcartConfig::default();
        config.catalog.birthday_category = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_browser_config_follows_settings() {
        let mut config = FlorcartConfig::default();
        assert!(config.browser_config().headless);

        config.browser.headless = false;
        assert!(!config.browser_config().headless);
    }

    #[test]
    fn test_overrides_from_run_args() {
        let args = crate::cli::RunArgs {
            base_url: Some("http://localhost:3000".to_string()),
            visible: true,
            ..Default::default()
        };
        let overrides = CliOverrides::from(&args);
        assert_eq!(overrides.base_url.as_deref(), Some("http://localhost:3000"));
        assert!(overrides.visible);
        assert_eq!(overrides.artifacts_dir, None);
    }
}
