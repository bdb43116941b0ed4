//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use notes_core::entities::RefreshSession;
use notes_core::error::DomainError;
use notes_core::traits::{RepoResult, SessionRepository};

use crate::models::SessionModel;

use super::error::{map_db_error, map_not_found, map_unique_violation};

/// PostgreSQL implementation of SessionRepository
///
/// The tokens table is unique on `user_id` and on `token`.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, token))]
    async fn save_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SessionExists))?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_session(&self, token: &str) -> RepoResult<RefreshSession> {
        sqlx::query_as::<_, SessionModel>(
            r"
            SELECT id, user_id, token, expires_at
            FROM tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map(RefreshSession::from)
        .map_err(|e| map_not_found(e, || DomainError::SessionNotFound))
    }

    #[instrument(skip(self, token))]
    async fn update_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE tokens
            SET token = $1, expires_at = $2
            WHERE user_id = $3
            ",
        )
        .bind(token)
        .bind(expires_at)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SessionNotFound);
        }

        Ok(())
    }

    /// Single-statement rotation; the unique index on `user_id` arbitrates
    /// concurrent callers.
    #[instrument(skip(self, token))]
    async fn upsert_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
            ",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
