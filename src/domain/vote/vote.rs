//! Vote entity - one member's answer in one session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, SessionId, Timestamp, VoteChoice, VoteId};

/// A cast vote. Immutable once created.
///
/// For a given session each member appears at most once; stores enforce
/// this with a uniqueness constraint on `(session_id, member_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    id: VoteId,
    member_id: MemberId,
    session_id: SessionId,
    choice: VoteChoice,
    cast_at: Timestamp,
}

impl Vote {
    pub fn new(
        member_id: MemberId,
        session_id: SessionId,
        choice: VoteChoice,
        cast_at: Timestamp,
    ) -> Self {
        Self {
            id: VoteId::new(),
            member_id,
            session_id,
            choice,
            cast_at,
        }
    }

    /// Reconstitute a vote from persistence.
    pub fn reconstitute(
        id: VoteId,
        member_id: MemberId,
        session_id: SessionId,
        choice: VoteChoice,
        cast_at: Timestamp,
    ) -> Self {
        Self {
            id,
            member_id,
            session_id,
            choice,
            cast_at,
        }
    }

    pub fn id(&self) -> &VoteId {
        &self.id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn choice(&self) -> VoteChoice {
        self.choice
    }

    pub fn cast_at(&self) -> &Timestamp {
        &self.cast_at
    }
}
