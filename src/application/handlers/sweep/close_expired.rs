//! CloseExpiredSessionsHandler - the deadline sweep.
//!
//! Flips every `Open` session whose closing time has strictly passed to
//! `Closed`. The write is conditional on the row still being `Open`, so
//! running the sweep twice, or on two replicas at once, closes each
//! session exactly once.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::SessionRepository;

/// What one closer tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CloseSweepSummary {
    /// Expired open sessions found.
    pub examined: usize,
    /// Sessions this tick transitioned to `Closed`.
    pub closed: usize,
    /// Sessions whose transition errored; retried next tick.
    pub failed: usize,
}

/// Handler for the session-closing sweep.
pub struct CloseExpiredSessionsHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl CloseExpiredSessionsHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn sweep(&self) -> Result<CloseSweepSummary, DomainError> {
        self.sweep_at(Timestamp::now()).await
    }

    /// Runs one sweep as of `now`.
    ///
    /// Only the initial query can fail the sweep; per-session failures
    /// are logged and counted.
    pub async fn sweep_at(&self, now: Timestamp) -> Result<CloseSweepSummary, DomainError> {
        let expired = self.sessions.find_expired_open(now).await?;
        let mut summary = CloseSweepSummary {
            examined: expired.len(),
            ..Default::default()
        };

        if expired.is_empty() {
            debug!("No expired sessions");
            return Ok(summary);
        }

        for mut session in expired {
            if let Err(e) = session.close() {
                warn!(session_id = %session.id(), error = %e, "Session cannot be closed");
                summary.failed += 1;
                continue;
            }

            match self.sessions.mark_closed(session.id()).await {
                Ok(true) => {
                    info!(session_id = %session.id(), "Session closed");
                    summary.closed += 1;
                }
                Ok(false) => {
                    debug!(session_id = %session.id(), "Session already closed elsewhere");
                }
                Err(e) => {
                    warn!(session_id = %session.id(), error = %e, "Failed to close session");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::canvass::Canvass;
    use crate::domain::foundation::{AgendaId, CanvassId, ErrorCode, SessionId, SessionStatus};
    use crate::domain::session::{DeadlineMinutes, Session};
    use crate::ports::SaveResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn session_opened_at(secs: i64) -> (Session, Canvass) {
        let canvass = Canvass::new(CanvassId::new(), "Budget");
        let session = Session::open(
            AgendaId::new(),
            *canvass.id(),
            Timestamp::from_unix_secs(secs),
            DeadlineMinutes::DEFAULT,
        );
        (session, canvass)
    }

    /// Records every conditional write and optionally fails them.
    struct MockSessionRepository {
        expired: Vec<Session>,
        writes: Mutex<Vec<SessionId>>,
        fail_for: Option<SessionId>,
    }

    impl MockSessionRepository {
        fn with_expired(expired: Vec<Session>) -> Self {
            Self {
                expired,
                writes: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn insert(&self, _: &Session, _: &Canvass) -> Result<SaveResult, DomainError> {
            Ok(SaveResult::Inserted)
        }
        async fn find_by_id(&self, _: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }
        async fn find_by_agenda(&self, _: &AgendaId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }
        async fn find_expired_open(&self, _: Timestamp) -> Result<Vec<Session>, DomainError> {
            Ok(self.expired.clone())
        }
        async fn find_closed_unpublished(&self) -> Result<Vec<Session>, DomainError> {
            Ok(vec![])
        }
        async fn mark_closed(&self, id: &SessionId) -> Result<bool, DomainError> {
            if self.fail_for == Some(*id) {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"));
            }
            self.writes.lock().unwrap().push(*id);
            Ok(true)
        }
        async fn mark_published(&self, _: &SessionId) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn release_publication(&self, _: &SessionId) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn no_expired_sessions_means_no_writes() {
        let repo = Arc::new(MockSessionRepository::with_expired(vec![]));
        let handler = CloseExpiredSessionsHandler::new(repo.clone());

        let summary = handler.sweep().await.unwrap();

        assert_eq!(summary, CloseSweepSummary::default());
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let (a, _) = session_opened_at(0);
        let (b, _) = session_opened_at(0);
        let repo = Arc::new(MockSessionRepository {
            fail_for: Some(*a.id()),
            ..MockSessionRepository::with_expired(vec![a, b.clone()])
        });
        let handler = CloseExpiredSessionsHandler::new(repo.clone());

        let summary = handler.sweep_at(Timestamp::from_unix_secs(120)).await.unwrap();

        assert_eq!(summary.examined, 2);
        assert_eq!(summary.closed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(repo.writes.lock().unwrap().as_slice(), &[*b.id()]);
    }

    #[tokio::test]
    async fn sweeping_twice_closes_once() {
        let store = InMemoryStore::new();
        let (session, canvass) = session_opened_at(0);
        SessionRepository::insert(&store, &session, &canvass)
            .await
            .unwrap();
        let handler = CloseExpiredSessionsHandler::new(Arc::new(store.clone()));
        let later = Timestamp::from_unix_secs(61);

        let first = handler.sweep_at(later).await.unwrap();
        let second = handler.sweep_at(later).await.unwrap();

        assert_eq!(first.closed, 1);
        assert_eq!(second, CloseSweepSummary::default());
        let stored = SessionRepository::find_by_id(&store, session.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), SessionStatus::Closed);
    }

    #[tokio::test]
    async fn session_at_exact_deadline_is_left_open() {
        let store = InMemoryStore::new();
        let (session, canvass) = session_opened_at(0);
        SessionRepository::insert(&store, &session, &canvass)
            .await
            .unwrap();
        let handler = CloseExpiredSessionsHandler::new(Arc::new(store));

        let summary = handler.sweep_at(*session.closing_time()).await.unwrap();

        assert_eq!(summary.examined, 0);
    }
}
