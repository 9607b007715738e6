//! PostgreSQL implementation of SessionRepository.
//!
//! Sessions and their canvass are inserted in one transaction. Status and
//! published flips are conditional `UPDATE`s whose affected-row count
//! tells the caller whether it performed the transition.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::schema::column;
use crate::domain::canvass::Canvass;
use crate::domain::foundation::{
    AgendaId, CanvassId, DomainError, SessionId, SessionStatus, Timestamp,
};
use crate::domain::session::Session;
use crate::ports::{SaveResult, SessionRepository};

const SESSION_COLUMNS: &str =
    "id, agenda_id, canvass_id, opening_time, closing_time, status, published";

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(
        &self,
        sql: &str,
        now: Option<Timestamp>,
    ) -> Result<Vec<Session>, DomainError> {
        let mut query = sqlx::query(sql);
        if let Some(now) = now {
            query = query.bind(*now.as_datetime());
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch sessions", e))?;

        rows.iter().map(row_to_session).collect()
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(
        &self,
        session: &Session,
        canvass: &Canvass,
    ) -> Result<SaveResult, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO canvasses (id, title, total_votes, affirmative_votes, negative_votes)
            VALUES ($1, $2, 0, 0, 0)
            "#,
        )
        .bind(canvass.id().as_uuid())
        .bind(canvass.title())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert canvass", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO sessions (
                id, agenda_id, canvass_id, opening_time, closing_time, status, published
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (agenda_id) DO NOTHING
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.agenda_id().as_uuid())
        .bind(session.canvass_id().as_uuid())
        .bind(session.opening_time().as_datetime())
        .bind(session.closing_time().as_datetime())
        .bind(session.status().as_str())
        .bind(session.is_published())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert session", e))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database("Failed to roll back", e))?;
            return Ok(SaveResult::AlreadyExists);
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit session", e))?;
        Ok(SaveResult::Inserted)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM sessions WHERE id = $1", SESSION_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE agenda_id = $1",
            SESSION_COLUMNS
        ))
        .bind(agenda_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session by agenda", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_expired_open(&self, now: Timestamp) -> Result<Vec<Session>, DomainError> {
        let sql = format!(
            "SELECT {} FROM sessions \
             WHERE status = 'OPEN' AND closing_time < $1 ORDER BY closing_time",
            SESSION_COLUMNS
        );
        self.fetch_all(&sql, Some(now)).await
    }

    async fn find_closed_unpublished(&self) -> Result<Vec<Session>, DomainError> {
        let sql = format!(
            "SELECT {} FROM sessions \
             WHERE status = 'CLOSED' AND published = FALSE ORDER BY closing_time",
            SESSION_COLUMNS
        );
        self.fetch_all(&sql, None).await
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE sessions SET status = $2 WHERE id = $1 AND status = $3")
            .bind(id.as_uuid())
            .bind(SessionStatus::Closed.as_str())
            .bind(SessionStatus::Open.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to close session", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_published(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET published = TRUE
            WHERE id = $1 AND status = $2 AND published = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(SessionStatus::Closed.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to mark session published", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_publication(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET published = FALSE
            WHERE id = $1 AND status = $2 AND published = TRUE
            "#,
        )
        .bind(id.as_uuid())
        .bind(SessionStatus::Closed.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to release publication claim", e))?;

        Ok(result.rows_affected() == 1)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    s.parse().map_err(|e| DomainError::database("Invalid session status", e))
}

fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let agenda_id: uuid::Uuid = column(row, "agenda_id")?;
    let canvass_id: uuid::Uuid = column(row, "canvass_id")?;
    let opening_time: chrono::DateTime<chrono::Utc> = column(row, "opening_time")?;
    let closing_time: chrono::DateTime<chrono::Utc> = column(row, "closing_time")?;
    let status: String = column(row, "status")?;
    let published: bool = column(row, "published")?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        AgendaId::from_uuid(agenda_id),
        CanvassId::from_uuid(canvass_id),
        Timestamp::from_datetime(opening_time),
        Timestamp::from_datetime(closing_time),
        str_to_session_status(&status)?,
        published,
    ))
}
