//! Database models - SQLx-compatible structs for PostgreSQL tables

mod note;
mod session;
mod user;

pub use note::NoteModel;
pub use session::SessionModel;
pub use user::UserModel;
