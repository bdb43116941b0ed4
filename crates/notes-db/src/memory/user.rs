//! In-memory UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use notes_core::entities::User;
use notes_core::error::DomainError;
use notes_core::traits::{RepoResult, UserRepository};

#[derive(Default)]
struct UserTable {
    last_id: i64,
    by_id: HashMap<i64, User>,
    by_email: HashMap<String, i64>,
}

/// In-memory user directory, unique on email
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.table.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a user without touching other stores
    pub fn remove(&self, id: i64) -> Option<User> {
        let mut table = self.table.lock();
        let user = table.by_id.remove(&id)?;
        table.by_email.remove(&user.email);
        Some(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save_user(&self, email: &str, password_hash: &str) -> RepoResult<i64> {
        let mut table = self.table.lock();
        if table.by_email.contains_key(email) {
            return Err(DomainError::UserExists);
        }

        table.last_id += 1;
        let id = table.last_id;
        table
            .by_id
            .insert(id, User::new(id, email.to_string(), password_hash.to_string()));
        table.by_email.insert(email.to_string(), id);
        Ok(id)
    }

    async fn user_by_email(&self, email: &str) -> RepoResult<User> {
        let table = self.table.lock();
        table
            .by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn user_by_id(&self, id: i64) -> RepoResult<User> {
        self.table
            .lock()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }
}
