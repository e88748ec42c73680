//! Client configuration

use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Where the storefront finds the showroom API
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the API, including the `/api` prefix
    pub api_base: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000/api".to_string(),
            timeout_secs: 15,
        }
    }
}

impl StorefrontConfig {
    /// Create a new StorefrontConfig from environment variables
    ///
    /// # Environment Variables
    /// - `STOREFRONT_API_BASE` (default: `http://localhost:8000/api`)
    /// - `STOREFRONT_TIMEOUT_SECS` (default: 15)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("api_base", defaults.api_base)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Configuration pointing at an explicit API base
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        unsafe {
            std::env::remove_var("STOREFRONT_API_BASE");
            std::env::remove_var("STOREFRONT_TIMEOUT_SECS");
        }

        let config = StorefrontConfig::from_env().unwrap();
        assert_eq!(config.api_base, "http://localhost:8000/api");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        unsafe {
            std::env::set_var("STOREFRONT_API_BASE", "https://showroom.example/api");
            std::env::set_var("STOREFRONT_TIMEOUT_SECS", "3");
        }

        let config = StorefrontConfig::from_env().unwrap();
        assert_eq!(config.api_base, "https://showroom.example/api");
        assert_eq!(config.timeout_secs, 3);

        unsafe {
            std::env::remove_var("STOREFRONT_API_BASE");
            std::env::remove_var("STOREFRONT_TIMEOUT_SECS");
        }
    }
}
