//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod validated;

pub use auth::{AuthUser, RefreshCookie, REFRESH_COOKIE};
pub use pagination::{NotesQuery, PageParams};
pub use validated::ValidatedJson;
