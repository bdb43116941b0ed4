//! In-memory SessionRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use notes_core::entities::RefreshSession;
use notes_core::error::DomainError;
use notes_core::traits::{RepoResult, SessionRepository};

#[derive(Default)]
struct SessionTable {
    last_id: i64,
    by_user: HashMap<i64, RefreshSession>,
    by_token: HashMap<String, i64>,
}

impl SessionTable {
    fn insert(&mut self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> RepoResult<()> {
        if self.by_user.contains_key(&user_id) || self.by_token.contains_key(token) {
            return Err(DomainError::SessionExists);
        }
        self.last_id += 1;
        self.by_user.insert(
            user_id,
            RefreshSession::new(self.last_id, user_id, token.to_string(), expires_at),
        );
        self.by_token.insert(token.to_string(), user_id);
        Ok(())
    }

    fn update(&mut self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> RepoResult<()> {
        if self
            .by_token
            .get(token)
            .is_some_and(|owner| *owner != user_id)
        {
            return Err(DomainError::DatabaseError(
                "duplicate refresh token value".to_string(),
            ));
        }

        let session = self
            .by_user
            .get_mut(&user_id)
            .ok_or(DomainError::SessionNotFound)?;
        self.by_token.remove(&session.token);
        session.token = token.to_string();
        session.expires_at = expires_at;
        self.by_token.insert(token.to_string(), user_id);
        Ok(())
    }
}

/// In-memory session store, unique on user and on token value
#[derive(Default)]
pub struct InMemorySessionRepository {
    table: Mutex<SessionTable>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of session rows
    pub fn len(&self) -> usize {
        self.table.lock().by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current session of a user, if any
    pub fn session_for_user(&self, user_id: i64) -> Option<RefreshSession> {
        self.table.lock().by_user.get(&user_id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.table.lock().insert(user_id, token, expires_at)
    }

    async fn get_session(&self, token: &str) -> RepoResult<RefreshSession> {
        let table = self.table.lock();
        table
            .by_token
            .get(token)
            .and_then(|user_id| table.by_user.get(user_id))
            .cloned()
            .ok_or(DomainError::SessionNotFound)
    }

    async fn update_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.table.lock().update(user_id, token, expires_at)
    }

    async fn upsert_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut table = self.table.lock();
        if table.by_user.contains_key(&user_id) {
            table.update(user_id, token, expires_at)
        } else {
            table.insert(user_id, token, expires_at)
        }
    }
}
