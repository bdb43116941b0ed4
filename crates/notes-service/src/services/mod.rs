//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod note;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use note::NoteService;
