//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table
#[derive(Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub pass_hash: String,
    pub created_at: DateTime<Utc>,
}
