//! Authentication service
//!
//! Handles user registration, login, refresh-token rotation, and access
//! token verification.

use chrono::Utc;
use notes_common::{AppError, TokenPair};
use notes_core::{AccessClaims, DomainError};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::AuthRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and return its id.
    ///
    /// No session is created; the caller logs in separately.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: AuthRequest) -> ServiceResult<i64> {
        request
            .validate()
            .map_err(|e| ServiceError::App(AppError::invalid_input(e)))?;

        let password_hash = self.hash_password(request.password).await?;

        let user_id = self
            .ctx
            .user_repo()
            .save_user(&request.email, &password_hash)
            .await
            .map_err(|e| match e {
                DomainError::UserExists => {
                    warn!("Registration failed: email already registered");
                    ServiceError::App(AppError::UserExists)
                }
                other => ServiceError::Domain(other),
            })?;

        info!(user_id, "User registered successfully");
        Ok(user_id)
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: AuthRequest) -> ServiceResult<TokenPair> {
        let user = match self.ctx.user_repo().user_by_email(&request.email).await {
            Ok(user) => user,
            Err(DomainError::UserNotFound) => {
                warn!("Login failed: user not found");
                return Err(ServiceError::App(AppError::InvalidCredentials));
            }
            Err(e) => return Err(e.into()),
        };

        if !self
            .verify_password(request.password, user.password_hash.clone())
            .await?
        {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let token_pair = self.issue_session(user.id).await?;

        info!(user_id = user.id, "User logged in successfully");
        Ok(token_pair)
    }

    /// Rotate a refresh token into a fresh token pair.
    ///
    /// The presented token stops resolving once the session row is
    /// overwritten with the new one.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_tokens(&self, refresh_token: &str) -> ServiceResult<TokenPair> {
        let session = self
            .ctx
            .session_repo()
            .get_session(refresh_token)
            .await
            .map_err(|e| match e {
                DomainError::SessionNotFound => ServiceError::App(AppError::RefreshTokenNotFound),
                other => ServiceError::Domain(other),
            })?;

        if session.is_expired_at(Utc::now()) {
            warn!(user_id = session.user_id, "Refresh failed: session expired");
            return Err(ServiceError::App(AppError::RefreshTokenExpired));
        }

        let user = self
            .ctx
            .user_repo()
            .user_by_id(session.user_id)
            .await
            .map_err(|e| match e {
                DomainError::UserNotFound => {
                    error!(user_id = session.user_id, "Session belongs to a missing user");
                    ServiceError::internal(format!(
                        "session references missing user {}",
                        session.user_id
                    ))
                }
                other => ServiceError::Domain(other),
            })?;

        let token_pair = self.issue_session(user.id).await?;

        info!(user_id = user.id, "Tokens refreshed successfully");
        Ok(token_pair)
    }

    /// Verify an access token without touching any store
    #[instrument(skip(self, token))]
    pub fn verify_access_token(&self, token: &str) -> ServiceResult<AccessClaims> {
        self.ctx
            .jwt_service()
            .verify_access_token(token)
            .map_err(ServiceError::from)
    }

    /// Mint a token pair and persist its refresh half.
    ///
    /// Nothing is returned unless the session write succeeds.
    async fn issue_session(&self, user_id: i64) -> ServiceResult<TokenPair> {
        let token_pair = self.ctx.jwt_service().generate_token_pair(user_id)?;

        self.ctx
            .session_repo()
            .upsert_session(user_id, &token_pair.refresh_token, token_pair.refresh_expires_at)
            .await
            .map_err(|e| {
                error!(user_id, error = %e, "Failed to persist refresh session");
                ServiceError::Domain(e)
            })?;

        Ok(token_pair)
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.ctx.password_service();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| ServiceError::App(AppError::HashingFailed))?
            .map_err(ServiceError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = self.ctx.password_service();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::internal(format!("password verification task failed: {e}")))
    }
}
