//! Redis adapters.

mod message_sink;

pub use message_sink::RedisMessageSink;
