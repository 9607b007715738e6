//! PostgreSQL implementation of AgendaRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::schema::column;
use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, DomainError, Timestamp};
use crate::ports::AgendaRepository;

/// PostgreSQL implementation of AgendaRepository.
#[derive(Clone)]
pub struct PostgresAgendaRepository {
    pool: PgPool,
}

impl PostgresAgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgendaRepository for PostgresAgendaRepository {
    async fn save(&self, agenda: &Agenda) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO agendas (id, title, created_at) VALUES ($1, $2, $3)")
            .bind(agenda.id().as_uuid())
            .bind(agenda.title())
            .bind(agenda.created_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to insert agenda", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError> {
        let row = sqlx::query("SELECT id, title, created_at FROM agendas WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch agenda", e))?;

        match row {
            Some(row) => {
                let id: uuid::Uuid = column(&row, "id")?;
                let title: String = column(&row, "title")?;
                let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
                Ok(Some(Agenda::reconstitute(
                    AgendaId::from_uuid(id),
                    title,
                    Timestamp::from_datetime(created_at),
                )))
            }
            None => Ok(None),
        }
    }
}
