//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COOP_ASSEMBLY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use coop_assembly::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod eligibility;
mod error;
mod redis;
mod scheduler;
mod server;

pub use database::DatabaseConfig;
pub use eligibility::EligibilityConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use scheduler::SchedulerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Postgres and Redis are optional; without them the service runs on
/// in-memory adapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: Option<DatabaseConfig>,

    /// Redis configuration (result publication)
    pub redis: Option<RedisConfig>,

    /// Sweep intervals, result destination and default deadline
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Member eligibility service
    #[serde(default)]
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COOP_ASSEMBLY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COOP_ASSEMBLY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COOP_ASSEMBLY__DATABASE__URL=...` -> `database.url = ...`
    /// - `COOP_ASSEMBLY__SCHEDULER__CLOSER_INTERVAL_SECS=30`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COOP_ASSEMBLY")
                    .prefix_separator("__")
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
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        self.scheduler.validate()?;
        self.eligibility.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "COOP_ASSEMBLY__DATABASE__URL",
        "COOP_ASSEMBLY__REDIS__URL",
        "COOP_ASSEMBLY__SERVER__PORT",
        "COOP_ASSEMBLY__SERVER__ENVIRONMENT",
        "COOP_ASSEMBLY__SCHEDULER__CLOSER_INTERVAL_SECS",
        "COOP_ASSEMBLY__ELIGIBILITY__BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_in_memory_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert!(config.database.is_none());
        assert!(config.redis.is_none());
        assert!(config.eligibility.base_url.is_none());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.scheduler.closer_interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COOP_ASSEMBLY__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("COOP_ASSEMBLY__REDIS__URL", "redis://localhost:6379");
        env::set_var("COOP_ASSEMBLY__SCHEDULER__CLOSER_INTERVAL_SECS", "15");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.database.as_ref().map(|d| d.url.as_str()),
            Some("postgresql://test@localhost/test")
        );
        assert_eq!(
            config.redis.as_ref().map(|r| r.url.as_str()),
            Some("redis://localhost:6379")
        );
        assert_eq!(config.scheduler.closer_interval_secs, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COOP_ASSEMBLY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_invalid_section_fails_validation() {
        let config = AppConfig {
            redis: Some(RedisConfig {
                url: "localhost".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRedisUrl));
    }
}
