//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `AgendaRepository` - Agenda registry storage
//! - `SessionRepository` - Sessions, their filtered sweep queries and
//!   conditional status/published writes
//! - `CanvassRepository` - Vote counters with atomic increment
//! - `VoteRepository` - Vote ledger with per-member uniqueness
//!
//! ## Collaborator Ports
//!
//! - `EligibilityChecker` - External member-eligibility service
//! - `MessageSink` - Message broker that receives final results
//! - `ReportEncoder` - Wire encoding of published results

mod agenda_repository;
mod canvass_repository;
mod eligibility_checker;
mod message_sink;
mod report_encoder;
mod save_result;
mod session_repository;
mod vote_repository;

pub use agenda_repository::AgendaRepository;
pub use canvass_repository::CanvassRepository;
pub use eligibility_checker::{Eligibility, EligibilityChecker};
pub use message_sink::MessageSink;
pub use report_encoder::{ReportEncoder, SerializationFailure};
pub use save_result::SaveResult;
pub use session_repository::SessionRepository;
pub use vote_repository::VoteRepository;
