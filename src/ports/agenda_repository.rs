//! Agenda repository port.

use async_trait::async_trait;

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, DomainError};

/// Repository port for the agenda registry.
#[async_trait]
pub trait AgendaRepository: Send + Sync {
    /// Persist a newly registered agenda.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, agenda: &Agenda) -> Result<(), DomainError>;

    /// Find an agenda by its ID.
    ///
    /// Returns `None` if not found; callers decide whether absence is fatal.
    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError>;
}
