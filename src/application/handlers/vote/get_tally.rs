//! GetTallyHandler - Query handler for an agenda's live tally.

use std::sync::Arc;

use crate::domain::canvass::Report;
use crate::domain::foundation::{AgendaId, Reference};
use crate::domain::session::SessionError;
use crate::ports::{CanvassRepository, SessionRepository};

/// Query for the tally of an agenda's session.
#[derive(Debug, Clone, Copy)]
pub struct GetTallyQuery {
    pub agenda_id: AgendaId,
}

/// Handler that snapshots the canvass of an agenda's session.
pub struct GetTallyHandler {
    sessions: Arc<dyn SessionRepository>,
    canvasses: Arc<dyn CanvassRepository>,
}

impl GetTallyHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        canvasses: Arc<dyn CanvassRepository>,
    ) -> Self {
        Self {
            sessions,
            canvasses,
        }
    }

    pub async fn handle(&self, query: GetTallyQuery) -> Result<Report, SessionError> {
        let session = self
            .sessions
            .find_by_agenda(&query.agenda_id)
            .await?
            .ok_or_else(|| SessionError::not_found(Reference::SessionForAgenda(query.agenda_id)))?;

        let canvass = self
            .canvasses
            .find_by_id(session.canvass_id())
            .await?
            .ok_or_else(|| SessionError::not_found(Reference::Canvass(*session.canvass_id())))?;

        Ok(Report::snapshot(&session, &canvass))
    }
}
