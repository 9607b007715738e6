//! GetSessionHandler - Query handler for loading a session with its agenda.

use std::sync::Arc;

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, Reference, SessionId, SessionStatus, Timestamp};
use crate::domain::session::{Session, SessionError};
use crate::ports::{AgendaRepository, SessionRepository};

/// Query to load a session.
#[derive(Debug, Clone, Copy)]
pub enum GetSessionQuery {
    ById(SessionId),
    ByAgenda(AgendaId),
}

/// Read view of a session.
///
/// `status` is derived from the voting window at query time, so a session
/// past its deadline reads as `Closed` even before the closer sweep runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub session: Session,
    pub agenda: Agenda,
    pub status: SessionStatus,
}

impl SessionView {
    pub fn at(session: Session, agenda: Agenda, now: Timestamp) -> Self {
        let status = session.status_at(now);
        Self {
            session,
            agenda,
            status,
        }
    }
}

/// Handler for loading sessions. Missing sessions are errors.
pub struct GetSessionHandler {
    agendas: Arc<dyn AgendaRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(agendas: Arc<dyn AgendaRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { agendas, sessions }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, SessionError> {
        self.handle_at(query, Timestamp::now()).await
    }

    pub async fn handle_at(
        &self,
        query: GetSessionQuery,
        now: Timestamp,
    ) -> Result<SessionView, SessionError> {
        let session = match query {
            GetSessionQuery::ById(id) => self
                .sessions
                .find_by_id(&id)
                .await?
                .ok_or_else(|| SessionError::not_found(Reference::Session(id)))?,
            GetSessionQuery::ByAgenda(agenda_id) => self
                .sessions
                .find_by_agenda(&agenda_id)
                .await?
                .ok_or_else(|| SessionError::not_found(Reference::SessionForAgenda(agenda_id)))?,
        };

        let agenda = self
            .agendas
            .find_by_id(session.agenda_id())
            .await?
            .ok_or_else(|| SessionError::not_found(Reference::Agenda(*session.agenda_id())))?;

        Ok(SessionView::at(session, agenda, now))
    }
}
