//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assembly voting domain.

mod errors;
mod ids;
mod session_status;
mod state_machine;
mod timestamp;
mod vote_choice;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AgendaId, CanvassId, MemberId, Reference, SessionId, VoteId};
pub use session_status::{status_for, SessionStatus};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use vote_choice::VoteChoice;
