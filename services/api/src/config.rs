//! Service configuration

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

use crate::rate_limiter::RateLimiterConfig;

/// Runtime settings of the showroom API
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Lifetime of a customer session in hours
    pub session_ttl_hours: i64,
    /// Lifetime of an employee session in hours
    pub employee_session_ttl_hours: i64,
    /// Password given to the `admin` employee when none exists
    pub admin_password: String,
    /// Failed logins tolerated per account within the window
    pub login_max_attempts: u32,
    pub login_window_seconds: u64,
    pub login_ban_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            session_ttl_hours: 24 * 30,
            employee_session_ttl_hours: 8,
            admin_password: "admin123".to_string(),
            login_max_attempts: 5,
            login_window_seconds: 300,
            login_ban_seconds: 900,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS` (default: `0.0.0.0:8000`)
    /// - `SESSION_TTL_HOURS` (default: 720)
    /// - `EMPLOYEE_SESSION_TTL_HOURS` (default: 8)
    /// - `ADMIN_PASSWORD` (default: `admin123`)
    /// - `LOGIN_MAX_ATTEMPTS`, `LOGIN_WINDOW_SECONDS`, `LOGIN_BAN_SECONDS`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("session_ttl_hours", defaults.session_ttl_hours)?
            .set_default(
                "employee_session_ttl_hours",
                defaults.employee_session_ttl_hours,
            )?
            .set_default("admin_password", defaults.admin_password)?
            .set_default("login_max_attempts", i64::from(defaults.login_max_attempts))?
            .set_default("login_window_seconds", defaults.login_window_seconds as i64)?
            .set_default("login_ban_seconds", defaults.login_ban_seconds as i64)?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Rate limiter settings for login endpoints
    pub fn login_rate_limit(&self) -> RateLimiterConfig {
        RateLimiterConfig {
            max_attempts: self.login_max_attempts,
            window_seconds: self.login_window_seconds,
            ban_duration_seconds: self.login_ban_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        unsafe {
            std::env::set_var("BIND_ADDRESS", "127.0.0.1:9000");
            std::env::set_var("LOGIN_MAX_ATTEMPTS", "3");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.login_max_attempts, 3);
        assert_eq!(config.employee_session_ttl_hours, 8);
        assert_eq!(config.login_rate_limit().max_attempts, 3);

        unsafe {
            std::env::remove_var("BIND_ADDRESS");
            std::env::remove_var("LOGIN_MAX_ATTEMPTS");
        }
    }
}
