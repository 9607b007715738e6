//! PostgreSQL implementation of CanvassRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::schema::{column, counter};
use crate::domain::canvass::Canvass;
use crate::domain::foundation::{CanvassId, DomainError, ErrorCode, VoteChoice};
use crate::ports::CanvassRepository;

/// PostgreSQL implementation of CanvassRepository.
///
/// Increments are a single `UPDATE ... SET x = x + 1 ... RETURNING`, so
/// concurrent votes never lose updates.
#[derive(Clone)]
pub struct PostgresCanvassRepository {
    pool: PgPool,
}

impl PostgresCanvassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CanvassRepository for PostgresCanvassRepository {
    async fn find_by_id(&self, id: &CanvassId) -> Result<Option<Canvass>, DomainError> {
        let row = sqlx::query(
            "SELECT id, title, affirmative_votes, negative_votes FROM canvasses WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch canvass", e))?;

        row.as_ref().map(row_to_canvass).transpose()
    }

    async fn increment(&self, id: &CanvassId, choice: VoteChoice) -> Result<Canvass, DomainError> {
        let (affirmative, negative) = deltas(choice);
        let row = sqlx::query(
            r#"
            UPDATE canvasses SET
                total_votes = total_votes + 1,
                affirmative_votes = affirmative_votes + $2,
                negative_votes = negative_votes + $3
            WHERE id = $1
            RETURNING id, title, affirmative_votes, negative_votes
            "#,
        )
        .bind(id.as_uuid())
        .bind(affirmative)
        .bind(negative)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to increment canvass", e))?;

        match row {
            Some(row) => row_to_canvass(&row),
            None => Err(DomainError::new(
                ErrorCode::CanvassNotFound,
                format!("Canvass not found: {}", id),
            )),
        }
    }
}

fn deltas(choice: VoteChoice) -> (i64, i64) {
    match choice {
        VoteChoice::Yes => (1, 0),
        VoteChoice::No => (0, 1),
    }
}

fn row_to_canvass(row: &PgRow) -> Result<Canvass, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let title: String = column(row, "title")?;
    let affirmative: i64 = column(row, "affirmative_votes")?;
    let negative: i64 = column(row, "negative_votes")?;

    Ok(Canvass::reconstitute(
        CanvassId::from_uuid(id),
        title,
        counter(affirmative)?,
        counter(negative)?,
    ))
}
