//! Refresh session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the tokens table
#[derive(Clone, FromRow)]
pub struct SessionModel {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
