//! PostgreSQL implementation of VoteRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, MemberId, SessionId};
use crate::domain::vote::Vote;
use crate::ports::{SaveResult, VoteRepository};

/// PostgreSQL implementation of VoteRepository.
///
/// Relies on `UNIQUE (session_id, member_id)`; a conflicting insert writes
/// nothing and reports `AlreadyExists`.
#[derive(Clone)]
pub struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn exists(
        &self,
        session_id: &SessionId,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE session_id = $1 AND member_id = $2)",
        )
        .bind(session_id.as_uuid())
        .bind(member_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to check vote existence", e))?;

        Ok(result.0)
    }

    async fn insert(&self, vote: &Vote) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO votes (id, session_id, member_id, choice, cast_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_id, member_id) DO NOTHING
            "#,
        )
        .bind(vote.id().as_uuid())
        .bind(vote.session_id().as_uuid())
        .bind(vote.member_id().as_str())
        .bind(vote.choice().as_str())
        .bind(vote.cast_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert vote", e))?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }
}
