//! In-process store implementations
//!
//! Each store keeps its state behind a single `parking_lot::Mutex`, so the
//! uniqueness checks and writes of one call happen atomically with respect
//! to other callers.

mod note;
mod session;
mod user;

pub use note::InMemoryNoteRepository;
pub use session::InMemorySessionRepository;
pub use user::InMemoryUserRepository;
