//! Note database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the notes table
#[derive(Debug, Clone, FromRow)]
pub struct NoteModel {
    pub id: i64,
    pub note: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
