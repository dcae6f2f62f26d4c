//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `BOUTIQUE_PREMIUM` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use boutique_premium::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod email;
mod error;
mod premium;

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use premium::PremiumConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the premium membership
/// service. Load using [`AppConfig::load()`] which reads from
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Premium feature settings
    #[serde(default)]
    pub premium: PremiumConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `BOUTIQUE_PREMIUM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOUTIQUE_PREMIUM__DATABASE__URL=...` -> `database.url = ...`
    /// - `BOUTIQUE_PREMIUM__PREMIUM__PRODUCT_IDS=5,12` -> `premium.product_ids = "5,12"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are
    /// missing or values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOUTIQUE_PREMIUM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.email.validate()?;
        self.premium.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "BOUTIQUE_PREMIUM__DATABASE__URL",
            "postgresql://test@localhost/shop",
        );
        env::set_var("BOUTIQUE_PREMIUM__EMAIL__RESEND_API_KEY", "re_xxx");
    }

    fn clear_env() {
        env::remove_var("BOUTIQUE_PREMIUM__DATABASE__URL");
        env::remove_var("BOUTIQUE_PREMIUM__EMAIL__RESEND_API_KEY");
        env::remove_var("BOUTIQUE_PREMIUM__PREMIUM__PRODUCT_IDS");
        env::remove_var("BOUTIQUE_PREMIUM__PREMIUM__DISCOUNT_RATE_PERCENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/shop");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_premium_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.premium.discount_rate_percent, 8.0);
        assert_eq!(config.premium.duration_days, 365);
    }

    #[test]
    fn test_custom_premium_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOUTIQUE_PREMIUM__PREMIUM__PRODUCT_IDS", "5,12");
        env::set_var("BOUTIQUE_PREMIUM__PREMIUM__DISCOUNT_RATE_PERCENT", "8.25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.premium.product_ids, "5,12");
        assert_eq!(config.premium.discount_rate_percent, 8.25);
        assert_eq!(config.premium.parsed_product_ids().len(), 2);
    }
}
