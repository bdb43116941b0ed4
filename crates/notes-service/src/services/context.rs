//! Service context - dependency container for services
//!
//! Holds the stores, collaborators, and credential services needed by services.

use std::sync::Arc;

use notes_common::auth::{JwtService, PasswordService};
use notes_core::traits::{NoteRepository, SessionRepository, SpellChecker, UserRepository};
use notes_db::PgPool;

/// Service context containing all dependencies
///
/// It provides access to:
/// - The user directory, session store and note store
/// - The spell checker
/// - JWT and password services
///
/// Everything here is immutable after construction; mutable state lives in
/// the stores.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on in-memory stores
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    note_repo: Arc<dyn NoteRepository>,

    // Collaborators
    spell_checker: Arc<dyn SpellChecker>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the note repository
    pub fn note_repo(&self) -> &dyn NoteRepository {
        self.note_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the spell checker
    pub fn spell_checker(&self) -> &dyn SpellChecker {
        self.spell_checker.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get a shared handle to the password service
    pub fn password_service(&self) -> Arc<PasswordService> {
        Arc::clone(&self.password_service)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    note_repo: Option<Arc<dyn NoteRepository>>,
    spell_checker: Option<Arc<dyn SpellChecker>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn note_repo(mut self, repo: Arc<dyn NoteRepository>) -> Self {
        self.note_repo = Some(repo);
        self
    }

    pub fn spell_checker(mut self, checker: Arc<dyn SpellChecker>) -> Self {
        self.spell_checker = Some(checker);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// The pool is optional; the password service falls back to default
    /// argon2 parameters.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            session_repo: self
                .session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            note_repo: self
                .note_repo
                .ok_or_else(|| ServiceError::validation("note_repo is required"))?,
            spell_checker: self
                .spell_checker
                .ok_or_else(|| ServiceError::validation("spell_checker is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: self.password_service.unwrap_or_default(),
        })
    }
}
