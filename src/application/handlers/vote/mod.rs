//! Vote command and tally query handlers.

mod cast_vote;
mod get_tally;

pub use cast_vote::{CastVoteCommand, CastVoteHandler, CastVoteResult};
pub use get_tally::{GetTallyHandler, GetTallyQuery};
