//! # notes-service
//!
//! Application layer containing the session lifecycle, the note service,
//! external collaborators, and DTOs.

pub mod dto;
pub mod external;
pub mod services;

pub use dto::{
    AuthRequest, CreateNoteRequest, CreateNoteResponse, HealthResponse, NoteResponse,
    NotesResponse, ReadinessResponse, RegisterResponse, TokenResponse,
};
pub use external::{HttpSpellChecker, NoopSpellChecker};
pub use services::{
    AuthService, NoteService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
