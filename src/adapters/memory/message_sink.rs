//! In-memory message sink.
//!
//! Captures every published payload. Used in tests, and in development
//! when no Redis instance is configured.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::MessageSink;

/// A message captured by [`InMemoryMessageSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub destination: String,
    pub payload: String,
}

/// Message sink that keeps payloads in memory.
#[derive(Clone, Default)]
pub struct InMemoryMessageSink {
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
    fail: Arc<RwLock<bool>>,
}

impl InMemoryMessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent publishes fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.fail.write().await = failing;
    }

    /// Returns all captured messages.
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MessageSink for InMemoryMessageSink {
    async fn publish(&self, destination: &str, payload: &str) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::new(
                ErrorCode::PublishFailed,
                format!("Sink unavailable for {}", destination),
            ));
        }

        info!(destination, payload, "Result published");
        self.messages.write().await.push(PublishedMessage {
            destination: destination.to_string(),
            payload: payload.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_payloads_in_order() {
        let sink = InMemoryMessageSink::new();
        sink.publish("results", "a").await.unwrap();
        sink.publish("results", "b").await.unwrap();

        let messages = sink.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].payload, "a");
        assert_eq!(messages[1].destination, "results");
    }

    #[tokio::test]
    async fn failing_sink_captures_nothing() {
        let sink = InMemoryMessageSink::new();
        sink.set_failing(true).await;

        let err = sink.publish("results", "a").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PublishFailed);
        assert_eq!(sink.message_count().await, 0);
    }
}
