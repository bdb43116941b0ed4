//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in notes-core.

mod error;
mod note;
mod session;
mod user;

pub use note::PgNoteRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;
