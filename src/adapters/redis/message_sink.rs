//! Redis-backed message sink for publishing final results.
//!
//! Uses `PUBLISH <destination> <payload>` over a multiplexed connection,
//! so any number of subscribers on the destination channel receive each
//! report.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use crate::config::RedisConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::MessageSink;

/// Redis pub/sub message sink.
#[derive(Clone)]
pub struct RedisMessageSink {
    conn: MultiplexedConnection,
}

impl RedisMessageSink {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a multiplexed connection using the Redis configuration.
    ///
    /// # Errors
    ///
    /// - `PublishFailed` if the URL is invalid or the connection cannot be
    ///   established within the configured timeout
    pub async fn connect(config: &RedisConfig) -> Result<Self, DomainError> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            DomainError::new(ErrorCode::PublishFailed, format!("Invalid Redis URL: {}", e))
        })?;

        let handshake = client.get_multiplexed_tokio_connection();
        let conn = tokio::time::timeout(config.connect_timeout(), handshake)
            .await
            .map_err(|_| {
                DomainError::new(ErrorCode::PublishFailed, "Timed out connecting to Redis")
            })?
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::PublishFailed,
                    format!("Failed to connect to Redis: {}", e),
                )
            })?;

        Ok(Self::new(conn))
    }
}

#[async_trait]
impl MessageSink for RedisMessageSink {
    async fn publish(&self, destination: &str, payload: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(destination, payload).await.map_err(|e| {
            DomainError::new(
                ErrorCode::PublishFailed,
                format!("Failed to publish to {}: {}", destination, e),
            )
        })?;

        debug!(destination, receivers, "Published to Redis channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_is_reported_as_publish_failure() {
        let config = RedisConfig {
            url: "not-a-url".to_string(),
            ..Default::default()
        };

        let err = match RedisMessageSink::connect(&config).await {
            Ok(_) => panic!("connect should fail"),
            Err(e) => e,
        };

        assert_eq!(err.code, ErrorCode::PublishFailed);
    }
}
