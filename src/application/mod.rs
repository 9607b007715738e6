//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (open, cast) and query handlers (load, tally) are
//! separate types; the two scheduled sweeps live here as plain async
//! handlers so they can be driven directly from tests.

pub mod handlers;

pub use handlers::{
    // Agenda handlers
    CreateAgendaCommand, CreateAgendaHandler, GetAgendaHandler, GetAgendaQuery,
    // Session handlers
    GetSessionHandler, GetSessionQuery, OpenSessionCommand, OpenSessionHandler,
    OpenSessionResult, SessionView,
    // Vote handlers
    CastVoteCommand, CastVoteHandler, CastVoteResult, GetTallyHandler, GetTallyQuery,
    // Sweeps
    CloseExpiredSessionsHandler, CloseSweepSummary, PublishResultsHandler, PublishSweepSummary,
};
