//! In-memory persistence for agendas, sessions, canvasses and votes.
//!
//! All four repositories share one [`RwLock`] so that the check-and-insert
//! for uniqueness and the counter increments happen under a single write
//! lock, mirroring the unique indexes and atomic `UPDATE`s of the Postgres
//! adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::agenda::Agenda;
use crate::domain::canvass::Canvass;
use crate::domain::foundation::{
    AgendaId, CanvassId, DomainError, ErrorCode, MemberId, SessionId, SessionStatus, Timestamp,
    VoteChoice,
};
use crate::domain::session::Session;
use crate::domain::vote::Vote;
use crate::ports::{
    AgendaRepository, CanvassRepository, SaveResult, SessionRepository, VoteRepository,
};

#[derive(Default)]
struct State {
    agendas: HashMap<AgendaId, Agenda>,
    sessions: HashMap<SessionId, Session>,
    sessions_by_agenda: HashMap<AgendaId, SessionId>,
    canvasses: HashMap<CanvassId, Canvass>,
    votes: HashMap<(SessionId, MemberId), Vote>,
}

/// In-memory store implementing every repository port.
///
/// Cloning is cheap and clones share state, so one store can be handed to
/// each handler as a different `Arc<dyn ...Repository>`.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Number of stored votes across all sessions.
    pub async fn vote_count(&self) -> usize {
        self.state.read().await.votes.len()
    }
}

#[async_trait]
impl AgendaRepository for InMemoryStore {
    async fn save(&self, agenda: &Agenda) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.agendas.insert(*agenda.id(), agenda.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError> {
        Ok(self.state.read().await.agendas.get(id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn insert(
        &self,
        session: &Session,
        canvass: &Canvass,
    ) -> Result<SaveResult, DomainError> {
        let mut state = self.state.write().await;
        if state.sessions_by_agenda.contains_key(session.agenda_id()) {
            return Ok(SaveResult::AlreadyExists);
        }
        state
            .sessions_by_agenda
            .insert(*session.agenda_id(), *session.id());
        state.sessions.insert(*session.id(), session.clone());
        state.canvasses.insert(*canvass.id(), canvass.clone());
        Ok(SaveResult::Inserted)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.state.read().await.sessions.get(id).cloned())
    }

    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Option<Session>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .sessions_by_agenda
            .get(agenda_id)
            .and_then(|id| state.sessions.get(id))
            .cloned())
    }

    async fn find_expired_open(&self, now: Timestamp) -> Result<Vec<Session>, DomainError> {
        let state = self.state.read().await;
        let mut expired: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.status() == SessionStatus::Open && s.is_expired_at(now))
            .cloned()
            .collect();
        expired.sort_by_key(|s| *s.closing_time());
        Ok(expired)
    }

    async fn find_closed_unpublished(&self) -> Result<Vec<Session>, DomainError> {
        let state = self.state.read().await;
        let mut closed: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.status() == SessionStatus::Closed && !s.is_published())
            .cloned()
            .collect();
        closed.sort_by_key(|s| *s.closing_time());
        Ok(closed)
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(id) {
            Some(session) if session.status() == SessionStatus::Open => {
                session.close()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_published(&self, id: &SessionId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(id) {
            Some(session)
                if session.status() == SessionStatus::Closed && !session.is_published() =>
            {
                session.mark_published()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_publication(&self, id: &SessionId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(id) {
            Some(session)
                if session.status() == SessionStatus::Closed && session.is_published() =>
            {
                session.release_publication()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl CanvassRepository for InMemoryStore {
    async fn find_by_id(&self, id: &CanvassId) -> Result<Option<Canvass>, DomainError> {
        Ok(self.state.read().await.canvasses.get(id).cloned())
    }

    async fn increment(&self, id: &CanvassId, choice: VoteChoice) -> Result<Canvass, DomainError> {
        let mut state = self.state.write().await;
        let canvass = state.canvasses.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::CanvassNotFound, format!("Canvass not found: {}", id))
        })?;
        canvass.record(choice);
        Ok(canvass.clone())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn exists(
        &self,
        session_id: &SessionId,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.votes.contains_key(&(*session_id, member_id.clone())))
    }

    async fn insert(&self, vote: &Vote) -> Result<SaveResult, DomainError> {
        let mut state = self.state.write().await;
        let key = (*vote.session_id(), vote.member_id().clone());
        if state.votes.contains_key(&key) {
            return Ok(SaveResult::AlreadyExists);
        }
        state.votes.insert(key, vote.clone());
        Ok(SaveResult::Inserted)
    }
}
