//! GetAgendaHandler - Query handler for loading an agenda.

use std::sync::Arc;

use crate::domain::agenda::{Agenda, AgendaError};
use crate::domain::foundation::AgendaId;
use crate::ports::AgendaRepository;

/// Query to load an agenda by ID.
#[derive(Debug, Clone)]
pub struct GetAgendaQuery {
    pub agenda_id: AgendaId,
}

/// Handler for loading agendas.
///
/// A missing agenda is `Ok(None)`; callers decide whether that is an error.
pub struct GetAgendaHandler {
    repository: Arc<dyn AgendaRepository>,
}

impl GetAgendaHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetAgendaQuery) -> Result<Option<Agenda>, AgendaError> {
        Ok(self.repository.find_by_id(&query.agenda_id).await?)
    }
}
