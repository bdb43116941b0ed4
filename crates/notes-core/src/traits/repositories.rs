//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (Postgres or in-memory).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Note, RefreshSession, SpellError, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its store-assigned id.
    ///
    /// Fails with `UserExists` when the email is already taken.
    async fn save_user(&self, email: &str, password_hash: &str) -> RepoResult<i64>;

    /// Find user by email, failing with `UserNotFound`
    async fn user_by_email(&self, email: &str) -> RepoResult<User>;

    /// Find user by ID, failing with `UserNotFound`
    async fn user_by_id(&self, id: i64) -> RepoResult<User>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert the first session for a user.
    ///
    /// Fails with `SessionExists` when the user already has a session row.
    async fn save_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Find a session by its token value, failing with `SessionNotFound`
    async fn get_session(&self, token: &str) -> RepoResult<RefreshSession>;

    /// Overwrite the token and expiry of the user's existing session
    async fn update_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Insert the session, or overwrite it when the user already has one.
    ///
    /// The default falls back to `update_session` on `SessionExists`.
    /// Stores that can resolve the conflict in a single statement should
    /// override this.
    async fn upsert_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        match self.save_session(user_id, token, expires_at).await {
            Err(DomainError::SessionExists) => {
                self.update_session(user_id, token, expires_at).await
            }
            other => other,
        }
    }
}

// ============================================================================
// Note Repository
// ============================================================================

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note and return its id
    async fn save_note(&self, user_id: i64, note: &str) -> RepoResult<i64>;

    /// All notes of a user, oldest first
    async fn notes_by_user(&self, user_id: i64) -> RepoResult<Vec<Note>>;

    /// One page of a user's notes, oldest first
    async fn notes_page_by_user(&self, user_id: i64, limit: i64, offset: i64)
        -> RepoResult<Vec<Note>>;
}

// ============================================================================
// Spell Checker
// ============================================================================

#[async_trait]
pub trait SpellChecker: Send + Sync {
    /// Return the spelling errors found in `text`
    async fn check_spelling(&self, text: &str) -> RepoResult<Vec<SpellError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FlakySessions {
        rows: Mutex<Vec<(i64, String)>>,
        updates: Mutex<u32>,
    }

    #[async_trait]
    impl SessionRepository for FlakySessions {
        async fn save_session(&self, user_id: i64, token: &str, _: DateTime<Utc>) -> RepoResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|(id, _)| *id == user_id) {
                return Err(DomainError::SessionExists);
            }
            rows.push((user_id, token.to_string()));
            Ok(())
        }

        async fn get_session(&self, _: &str) -> RepoResult<RefreshSession> {
            Err(DomainError::SessionNotFound)
        }

        async fn update_session(&self, user_id: i64, token: &str, _: DateTime<Utc>) -> RepoResult<()> {
            *self.updates.lock().unwrap() += 1;
            let mut rows = self.rows.lock().unwrap();
            for row in rows.iter_mut().filter(|(id, _)| *id == user_id) {
                row.1 = token.to_string();
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_upsert_falls_back_to_update() {
        let store = FlakySessions::default();
        store.upsert_session(1, "a", Utc::now()).await.unwrap();
        store.upsert_session(1, "b", Utc::now()).await.unwrap();

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, "b");
        assert_eq!(*store.updates.lock().unwrap(), 1);
    }
}
