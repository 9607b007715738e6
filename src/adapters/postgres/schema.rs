//! Connection pool and schema bootstrap.
//!
//! The schema is created idempotently at startup. The two unique
//! constraints here are what the repositories rely on for the
//! one-session-per-agenda and one-vote-per-member rules.


use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Decode, Postgres, Row, Type};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

const SCHEMA: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS agendas (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS canvasses (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        total_votes BIGINT NOT NULL DEFAULT 0,
        affirmative_votes BIGINT NOT NULL DEFAULT 0,
        negative_votes BIGINT NOT NULL DEFAULT 0,
        CHECK (total_votes = affirmative_votes + negative_votes)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id UUID PRIMARY KEY,
        agenda_id UUID NOT NULL UNIQUE REFERENCES agendas(id),
        canvass_id UUID NOT NULL REFERENCES canvasses(id),
        opening_time TIMESTAMPTZ NOT NULL,
        closing_time TIMESTAMPTZ NOT NULL,
        status TEXT NOT NULL,
        published BOOLEAN NOT NULL DEFAULT FALSE,
        CHECK (opening_time < closing_time)
    );
    "#,
    r#"CREATE INDEX IF NOT EXISTS sessions_status_closing ON sessions(status, closing_time);"#,
    r#"
    CREATE TABLE IF NOT EXISTS votes (
        id UUID PRIMARY KEY,
        session_id UUID NOT NULL REFERENCES sessions(id),
        member_id TEXT NOT NULL,
        choice TEXT NOT NULL,
        cast_at TIMESTAMPTZ NOT NULL,
        UNIQUE (session_id, member_id)
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS sessions_unpublished
        ON sessions(status) WHERE published = FALSE;
    "#,
];

/// Opens a pool using the database configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database("Failed to connect to database", e))?;

    info!(pool_size = config.pool_size, "Database pool ready");
    Ok(pool)
}

/// Creates tables and indexes if they do not exist yet.
pub async fn initialize_schema(pool: &PgPool) -> Result<(), DomainError> {
    for stmt in SCHEMA {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(|e| DomainError::database("Failed to initialize schema", e))?;
    }
    Ok(())
}

/// Reads a column, mapping decode failures to `DatabaseError`.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

/// Counters are `BIGINT` in storage and never negative.
pub(super) fn counter(value: i64) -> Result<u64, DomainError> {
    u64::try_from(value)
        .map_err(|_| DomainError::database("Invalid counter", format!("negative value {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counter_is_rejected() {
        assert_eq!(counter(3).unwrap(), 3);
        assert!(counter(-1).is_err());
    }

    #[test]
    fn schema_declares_uniqueness_constraints() {
        let all = SCHEMA.concat();
        assert!(all.contains("agenda_id UUID NOT NULL UNIQUE"));
        assert!(all.contains("UNIQUE (session_id, member_id)"));
    }
}
