//! Session domain module.
//!
//! Handles the voting session lifecycle: opening against an agenda,
//! the clock-derived status, closing at the deadline and the one-time
//! publication flag.

mod aggregate;
mod errors;

pub use aggregate::{DeadlineMinutes, Session};
pub use errors::SessionError;
