//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{auth, health, notes};
use crate::state::AppState;

/// Create the main API router (excluding health, which is mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(note_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/registration", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", put(auth::refresh))
}

/// Note routes, all gated on a bearer access token
fn note_routes() -> Router<AppState> {
    Router::new().route("/notes", post(notes::create_note).get(notes::list_notes))
}
