//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `agenda` - Immutable topics put to the assembly
//! - `session` - Voting session lifecycle and clock-derived status
//! - `canvass` - Per-session vote counters and derived reports
//! - `vote` - Individual member votes and rejection reasons

pub mod agenda;
pub mod canvass;
pub mod foundation;
pub mod session;
pub mod vote;
