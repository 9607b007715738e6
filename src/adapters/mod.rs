//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Repository implementations on PostgreSQL
//! - `memory` - In-process repositories, sink and eligibility checker
//! - `redis` - Result publication over Redis pub/sub
//! - `eligibility` - HTTP client for the member registry
//! - `report` - Report encoding
//! - `http` - REST API
//! - `scheduler` - Timers for the closer and publisher sweeps

pub mod eligibility;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod report;
pub mod scheduler;

pub use eligibility::HttpEligibilityChecker;
pub use memory::{InMemoryMessageSink, InMemoryStore, StaticEligibilityChecker};
pub use report::JsonReportEncoder;
pub use scheduler::{SweepScheduler, SweepSchedulerConfig};
