//! Postgres settings for the session, vote and canvass stores.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool the service will open against one database.
const MAX_POOL_SIZE: u32 = 100;

/// Postgres store configuration.
///
/// Only present when the service runs against Postgres; without it the
/// in-memory store is used.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Connections shared by the HTTP handlers and the sweeper
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds a request waits for a free connection before failing
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Create tables and indexes on startup
    #[serde(default = "default_initialize_schema")]
    pub initialize_schema: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.pool_size == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.pool_size > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_pool_size(),
            acquire_timeout_secs: default_acquire_timeout(),
            initialize_schema: default_initialize_schema(),
        }
    }
}

fn default_pool_size() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_initialize_schema() -> bool {
    true
}
