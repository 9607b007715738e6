//! MessageSink port - publishes final results to the message broker.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for publishing a serialized payload to a named destination.
///
/// The destination name is deployment configuration; the core never
/// interprets it.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// # Errors
    ///
    /// - `PublishFailed` if the broker rejects or cannot receive the message
    async fn publish(&self, destination: &str, payload: &str) -> Result<(), DomainError>;
}
