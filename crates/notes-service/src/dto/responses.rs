//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use notes_core::{Note, SpellError};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
}

/// Access token response (login and refresh)
///
/// The refresh token travels in a cookie, never in the body.
#[derive(Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse").finish_non_exhaustive()
    }
}

// ============================================================================
// Note Responses
// ============================================================================

/// Create note response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    pub id: i64,
    pub spelling_errors: Vec<SpellError>,
}

/// Single note
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            note: note.note,
            created_at: note.created_at,
        }
    }
}

/// Note listing
#[derive(Debug, Clone, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<NoteResponse>,
}

impl From<Vec<Note>> for NotesResponse {
    fn from(notes: Vec<Note>) -> Self {
        Self {
            notes: notes.into_iter().map(NoteResponse::from).collect(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
