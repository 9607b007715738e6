//! Vote repository port - the vote ledger store.

use async_trait::async_trait;

use super::SaveResult;
use crate::domain::foundation::{DomainError, MemberId, SessionId};
use crate::domain::vote::Vote;

/// Repository port for cast votes.
///
/// Implementations should use a uniqueness constraint on
/// `(session_id, member_id)` to prevent race conditions between
/// concurrent votes by the same member.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Check whether the member already voted in the session.
    ///
    /// This is a fast-path check only; `insert` is the guarantee.
    async fn exists(&self, session_id: &SessionId, member_id: &MemberId)
        -> Result<bool, DomainError>;

    /// Attempt to insert a vote.
    ///
    /// Uses `ON CONFLICT DO NOTHING` semantics: returns `AlreadyExists`
    /// if another vote for the same member and session is already stored.
    async fn insert(&self, vote: &Vote) -> Result<SaveResult, DomainError>;
}
