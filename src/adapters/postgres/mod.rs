//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAgendaRepository` - Agenda registry
//! - `PostgresSessionRepository` - Sessions (inserted together with their canvass)
//! - `PostgresCanvassRepository` - Atomic counter updates
//! - `PostgresVoteRepository` - Vote ledger with per-member uniqueness

mod agenda_repository;
mod canvass_repository;
mod schema;
mod session_repository;
mod vote_repository;

pub use agenda_repository::PostgresAgendaRepository;
pub use canvass_repository::PostgresCanvassRepository;
pub use schema::{connect, initialize_schema};
pub use session_repository::PostgresSessionRepository;
pub use vote_repository::PostgresVoteRepository;
