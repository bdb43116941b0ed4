//! Authentication handlers
//!
//! Endpoints for user registration, login, and refresh-token rotation.
//! The access token travels in the JSON body, the refresh token in an
//! HttpOnly cookie scoped to `/api/auth`.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use notes_common::{AppError, TokenPair};
use notes_service::{AuthRequest, AuthService, RegisterResponse, TokenResponse};

use crate::extractors::{RefreshCookie, ValidatedJson, REFRESH_COOKIE};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Path the refresh cookie is scoped to
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Register a new user
///
/// POST /api/auth/registration
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let id = AuthService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(RegisterResponse { id })))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthRequest>,
) -> ApiResult<impl IntoResponse> {
    let pair = AuthService::new(state.service_context())
        .login(request)
        .await?;
    token_response(&state, pair)
}

/// Rotate the refresh token from the cookie into a new pair
///
/// PUT /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    RefreshCookie(refresh_token): RefreshCookie,
) -> ApiResult<impl IntoResponse> {
    let pair = AuthService::new(state.service_context())
        .refresh_tokens(&refresh_token)
        .await?;
    token_response(&state, pair)
}

fn token_response(state: &AppState, pair: TokenPair) -> ApiResult<impl IntoResponse> {
    let cookie = refresh_cookie(&pair.refresh_token, state.jwt_service().refresh_token_expiry())?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(TokenResponse {
            token: pair.access_token,
        }),
    ))
}

/// Build the `Set-Cookie` value for a refresh token
pub fn refresh_cookie(token: &str, max_age_secs: i64) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!(
        "{REFRESH_COOKIE}={token}; Max-Age={max_age_secs}; Path={REFRESH_COOKIE_PATH}; HttpOnly; SameSite=Strict"
    ))
    .map_err(AppError::internal)
}
