//! In-memory adapters.
//!
//! Used by tests and when the service runs without Postgres or Redis.

mod eligibility;
mod message_sink;
mod store;

pub use eligibility::StaticEligibilityChecker;
pub use message_sink::{InMemoryMessageSink, PublishedMessage};
pub use store::InMemoryStore;
