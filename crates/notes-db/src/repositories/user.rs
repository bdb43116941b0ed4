//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use notes_core::entities::User;
use notes_core::error::DomainError;
use notes_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_not_found, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, password_hash))]
    async fn save_user(&self, email: &str, password_hash: &str) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO users (email, pass_hash, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UserExists))
    }

    #[instrument(skip(self))]
    async fn user_by_email(&self, email: &str) -> RepoResult<User> {
        sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, pass_hash, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map(User::from)
        .map_err(|e| map_not_found(e, || DomainError::UserNotFound))
    }

    #[instrument(skip(self))]
    async fn user_by_id(&self, id: i64) -> RepoResult<User> {
        sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, pass_hash, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map(User::from)
        .map_err(|e| map_not_found(e, || DomainError::UserNotFound))
    }
}
