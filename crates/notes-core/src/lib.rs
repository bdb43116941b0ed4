//! # notes-core
//!
//! Domain layer containing entities, domain errors and the store traits the
//! session lifecycle and note service depend on.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{AccessClaims, Note, NotePage, RefreshSession, SpellError, User};
pub use error::DomainError;
pub use traits::{NoteRepository, RepoResult, SessionRepository, SpellChecker, UserRepository};
