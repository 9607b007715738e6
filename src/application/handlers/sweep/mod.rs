//! Scheduled sweep handlers.
//!
//! Plain async methods; the scheduler adapter owns the timers.

mod close_expired;
mod publish_results;

pub use close_expired::{CloseExpiredSessionsHandler, CloseSweepSummary};
pub use publish_results::{PublishResultsHandler, PublishSweepSummary};
