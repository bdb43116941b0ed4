//! Authentication extractors
//!
//! [`AuthUser`] verifies the bearer access token on the Authorization header.
//! [`RefreshCookie`] reads the refresh token cookie.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization, Cookie},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use notes_common::AppError;
use notes_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refresh-token";

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: i64,
    /// When the presented access token stops being accepted
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        if bearer.token().is_empty() {
            return Err(ApiError::MissingAuth);
        }

        let app_state = AppState::from_ref(state);
        let claims = AuthService::new(app_state.service_context())
            .verify_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(AppError::InvalidToken)
            })?;

        Ok(AuthUser {
            user_id: claims.user_id,
            expires_at: claims.expires_at,
        })
    }
}

/// Refresh token taken from the `refresh-token` cookie
pub struct RefreshCookie(pub String);

impl std::fmt::Debug for RefreshCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RefreshCookie([REDACTED])")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshCookie
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = TypedHeader::<Cookie>::from_request_parts(parts, state)
            .await
            .ok();

        cookies
            .as_ref()
            .and_then(|TypedHeader(cookie)| cookie.get(REFRESH_COOKIE))
            .filter(|token| !token.is_empty())
            .map(|token| RefreshCookie(token.to_string()))
            .ok_or_else(|| {
                tracing::warn!("Refresh requested without a refresh-token cookie");
                ApiError::App(AppError::RefreshTokenNotFound)
            })
    }
}
