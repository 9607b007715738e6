//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod agenda;
pub mod session;
pub mod sweep;
pub mod vote;

pub use agenda::{CreateAgendaCommand, CreateAgendaHandler, GetAgendaHandler, GetAgendaQuery};
pub use session::{
    GetSessionHandler, GetSessionQuery, OpenSessionCommand, OpenSessionHandler,
    OpenSessionResult, SessionView,
};
pub use sweep::{
    CloseExpiredSessionsHandler, CloseSweepSummary, PublishResultsHandler, PublishSweepSummary,
};
pub use vote::{CastVoteCommand, CastVoteHandler, CastVoteResult, GetTallyHandler, GetTallyQuery};
