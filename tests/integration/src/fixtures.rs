//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration and login request
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn unique() -> Self {
        Self {
            email: format!("test{}@example.com", unique_suffix()),
            password: "password1".to_string(),
        }
    }

    pub fn with_password(&self, password: &str) -> Self {
        Self {
            email: self.email.clone(),
            password: password.to_string(),
        }
    }
}

/// Registration response
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
}

/// Login and refresh response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create note request
#[derive(Debug, Serialize)]
pub struct CreateNoteRequest {
    pub note: String,
}

impl CreateNoteRequest {
    pub fn new(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }
}

/// Create note response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    pub id: i64,
    pub spelling_errors: Vec<serde_json::Value>,
}

/// Note in a listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub note: String,
    pub created_at: String,
}

/// Note listing
#[derive(Debug, Deserialize)]
pub struct NotesResponse {
    pub notes: Vec<NoteResponse>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
