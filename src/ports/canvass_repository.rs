//! Canvass repository port - the tally store.

use async_trait::async_trait;

use crate::domain::canvass::Canvass;
use crate::domain::foundation::{CanvassId, DomainError, VoteChoice};

/// Repository port for vote counters.
///
/// Canvasses are created alongside their session (see
/// [`SessionRepository::insert`](super::SessionRepository::insert)) and
/// afterwards only change through [`CanvassRepository::increment`].
#[async_trait]
pub trait CanvassRepository: Send + Sync {
    /// Find a canvass by its ID.
    async fn find_by_id(&self, id: &CanvassId) -> Result<Option<Canvass>, DomainError>;

    /// Atomically apply one vote to the counters and return the new state.
    ///
    /// Concurrent increments on the same canvass must never lose updates.
    ///
    /// # Errors
    ///
    /// - `CanvassNotFound` if the canvass doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn increment(&self, id: &CanvassId, choice: VoteChoice) -> Result<Canvass, DomainError>;
}
