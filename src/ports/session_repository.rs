//! Session repository port.
//!
//! Persists sessions together with the canvass they own a reference to,
//! and exposes the filtered queries and conditional writes the sweeps
//! rely on.

use async_trait::async_trait;

use super::SaveResult;
use crate::domain::canvass::Canvass;
use crate::domain::foundation::{AgendaId, DomainError, SessionId, Timestamp};
use crate::domain::session::Session;

/// Repository port for Session persistence.
///
/// Implementations must ensure:
/// - at most one session per agenda (unique constraint on `agenda_id`)
/// - `mark_closed`, `mark_published` and `release_publication` only write
///   when the row is still in the expected prior state, so concurrent
///   sweeps cannot double-apply
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a session and its zeroed canvass atomically.
    ///
    /// Returns `AlreadyExists` (writing nothing) if the agenda already has
    /// a session.
    async fn insert(&self, session: &Session, canvass: &Canvass)
        -> Result<SaveResult, DomainError>;

    /// Find a session by its ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find the session opened for an agenda, if any.
    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Option<Session>, DomainError>;

    /// Sessions whose persisted status is `Open` and whose closing time is
    /// strictly before `now`.
    async fn find_expired_open(&self, now: Timestamp) -> Result<Vec<Session>, DomainError>;

    /// Sessions that are `Closed` and not yet published.
    async fn find_closed_unpublished(&self) -> Result<Vec<Session>, DomainError>;

    /// Set status to `Closed` if it is still `Open`.
    ///
    /// Returns `true` if this call performed the transition.
    async fn mark_closed(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Claim publication: set `published` to `true` if the session is
    /// `Closed` and unpublished.
    ///
    /// Returns `true` if this call performed the transition. Only the
    /// caller that wins the claim may send the report.
    async fn mark_published(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Give a claim back: set `published` to `false` if the session is
    /// `Closed` and published, so the next sweep retries it.
    ///
    /// Returns `true` if this call performed the transition.
    async fn release_publication(&self, id: &SessionId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }
}
