//! OpenSessionHandler - Command handler for opening a voting session.

use std::sync::Arc;

use tracing::info;

use crate::domain::agenda::Agenda;
use crate::domain::canvass::Canvass;
use crate::domain::foundation::{AgendaId, CanvassId, Reference, Timestamp};
use crate::domain::session::{DeadlineMinutes, Session, SessionError};
use crate::ports::{AgendaRepository, SaveResult, SessionRepository};

/// Command to open a session for an agenda.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub agenda_id: AgendaId,
    /// Falls back to the handler's default when absent.
    pub deadline_minutes: Option<DeadlineMinutes>,
}

/// Result of successfully opening a session.
#[derive(Debug, Clone)]
pub struct OpenSessionResult {
    pub session: Session,
    pub agenda: Agenda,
}

/// Handler for opening sessions.
///
/// The existence pre-check only avoids needless work; the repository's
/// uniqueness constraint on the agenda is what guarantees a single
/// session per agenda under concurrency.
pub struct OpenSessionHandler {
    agendas: Arc<dyn AgendaRepository>,
    sessions: Arc<dyn SessionRepository>,
    default_deadline: DeadlineMinutes,
}

impl OpenSessionHandler {
    pub fn new(
        agendas: Arc<dyn AgendaRepository>,
        sessions: Arc<dyn SessionRepository>,
        default_deadline: DeadlineMinutes,
    ) -> Self {
        Self {
            agendas,
            sessions,
            default_deadline,
        }
    }

    pub async fn handle(&self, cmd: OpenSessionCommand) -> Result<OpenSessionResult, SessionError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Opens the session as of `now`.
    pub async fn handle_at(
        &self,
        cmd: OpenSessionCommand,
        now: Timestamp,
    ) -> Result<OpenSessionResult, SessionError> {
        // 1. One session per agenda, whatever its status
        if self.sessions.find_by_agenda(&cmd.agenda_id).await?.is_some() {
            return Err(SessionError::AlreadyOpen(cmd.agenda_id));
        }

        // 2. Resolve the agenda
        let agenda = self
            .agendas
            .find_by_id(&cmd.agenda_id)
            .await?
            .ok_or_else(|| SessionError::not_found(Reference::Agenda(cmd.agenda_id)))?;

        // 3. Build session and zeroed canvass
        let deadline = cmd.deadline_minutes.unwrap_or(self.default_deadline);
        let canvass = Canvass::new(CanvassId::new(), agenda.title());
        let session = Session::open(*agenda.id(), *canvass.id(), now, deadline);

        // 4. Persist both; a concurrent opener may have won the race
        match self.sessions.insert(&session, &canvass).await? {
            SaveResult::Inserted => {}
            SaveResult::AlreadyExists => return Err(SessionError::AlreadyOpen(cmd.agenda_id)),
        }

        info!(
            session_id = %session.id(),
            agenda_id = %agenda.id(),
            closing_time = %session.closing_time().as_datetime(),
            "Session opened"
        );

        Ok(OpenSessionResult { session, agenda })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{
        DomainError, ErrorCode, SessionId, SessionStatus,
    };
    use async_trait::async_trait;

    async fn store_with_agenda(title: &str) -> (InMemoryStore, Agenda) {
        let store = InMemoryStore::new();
        let agenda = Agenda::new(title).unwrap();
        AgendaRepository::save(&store, &agenda).await.unwrap();
        (store, agenda)
    }

    fn handler(store: &InMemoryStore) -> OpenSessionHandler {
        OpenSessionHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            DeadlineMinutes::DEFAULT,
        )
    }

    #[tokio::test]
    async fn opens_session_with_default_deadline() {
        let (store, agenda) = store_with_agenda("Board Election").await;
        let now = Timestamp::from_unix_secs(1_000);

        let result = handler(&store)
            .handle_at(
                OpenSessionCommand {
                    agenda_id: *agenda.id(),
                    deadline_minutes: None,
                },
                now,
            )
            .await
            .unwrap();

        assert_eq!(result.session.status(), SessionStatus::Open);
        assert!(!result.session.is_published());
        assert_eq!(result.session.opening_time(), &now);
        assert_eq!(result.session.closing_time().as_unix_secs(), 1_060);
        assert_eq!(result.agenda.title(), "Board Election");
    }

    #[tokio::test]
    async fn creates_zeroed_canvass_with_agenda_title() {
        let (store, agenda) = store_with_agenda("Budget").await;

        let result = handler(&store)
            .handle(OpenSessionCommand {
                agenda_id: *agenda.id(),
                deadline_minutes: Some(DeadlineMinutes::new(10).unwrap()),
            })
            .await
            .unwrap();

        let canvass =
            crate::ports::CanvassRepository::find_by_id(&store, result.session.canvass_id())
                .await
                .unwrap()
                .unwrap();
        assert_eq!(canvass.title(), "Budget");
        assert_eq!(canvass.total_votes(), 0);
    }

    #[tokio::test]
    async fn second_open_fails_with_already_open() {
        let (store, agenda) = store_with_agenda("Budget").await;
        let handler = handler(&store);
        let cmd = OpenSessionCommand {
            agenda_id: *agenda.id(),
            deadline_minutes: None,
        };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, SessionError::AlreadyOpen(*agenda.id()));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_agenda_is_not_found() {
        let store = InMemoryStore::new();
        let agenda_id = AgendaId::new();

        let err = handler(&store)
            .handle(OpenSessionCommand {
                agenda_id,
                deadline_minutes: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AgendaNotFound);
        assert_eq!(store.session_count().await, 0);
    }

    /// Session repository that reports no existing session but loses the
    /// insert race, as when another request committed first.
    struct RacingSessionRepository;

    #[async_trait]
    impl SessionRepository for RacingSessionRepository {
        async fn insert(&self, _: &Session, _: &Canvass) -> Result<SaveResult, DomainError> {
            Ok(SaveResult::AlreadyExists)
        }
        async fn find_by_id(&self, _: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }
        async fn find_by_agenda(&self, _: &AgendaId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }
        async fn find_expired_open(&self, _: Timestamp) -> Result<Vec<Session>, DomainError> {
            Ok(vec![])
        }
        async fn find_closed_unpublished(&self) -> Result<Vec<Session>, DomainError> {
            Ok(vec![])
        }
        async fn mark_closed(&self, _: &SessionId) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn mark_published(&self, _: &SessionId) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn release_publication(&self, _: &SessionId) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn losing_insert_race_surfaces_as_already_open() {
        let (store, agenda) = store_with_agenda("Budget").await;
        let handler = OpenSessionHandler::new(
            Arc::new(store),
            Arc::new(RacingSessionRepository),
            DeadlineMinutes::DEFAULT,
        );

        let err = handler
            .handle(OpenSessionCommand {
                agenda_id: *agenda.id(),
                deadline_minutes: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionAlreadyOpen);
    }
}
