//! PostgreSQL implementation of NoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use notes_core::entities::Note;
use notes_core::traits::{NoteRepository, RepoResult};

use crate::models::NoteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NoteRepository
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    #[instrument(skip(self, note))]
    async fn save_note(&self, user_id: i64, note: &str) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO notes (note, user_id, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id
            ",
        )
        .bind(note)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn notes_by_user(&self, user_id: i64) -> RepoResult<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteModel>(
            r"
            SELECT id, note, user_id, created_at
            FROM notes
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    #[instrument(skip(self))]
    async fn notes_page_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteModel>(
            r"
            SELECT id, note, user_id, created_at
            FROM notes
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Note::from).collect())
    }
}
