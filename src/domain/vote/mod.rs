//! Vote domain module.
//!
//! A vote is a member's single yes/no answer in a session.

mod errors;
#[allow(clippy::module_inception)]
mod vote;

pub use errors::{VoteError, VoteRejection};
pub use vote::Vote;
