//! HTTP adapter for votes and tallies.

mod dto;
mod handlers;
mod routes;

pub use dto::{CastVoteRequest, TallyResponse, VoteResponse, VoteSessionSummary};
pub use handlers::VoteHandlers;
pub use routes::vote_routes;
