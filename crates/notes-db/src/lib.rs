//! # notes-db
//!
//! Database layer implementing the store traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the store traits
//! defined in `notes-core`. It handles:
//!
//! - Connection pool management
//! - Schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! The [`memory`] module carries in-process implementations of the same
//! traits for tests and database-less runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notes_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//! use notes_core::UserRepository;
//!
//! async fn example(url: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig { url, ..Default::default() }).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     let id = users.save_user("a@x.com", "$argon2id$...").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryNoteRepository, InMemorySessionRepository, InMemoryUserRepository};
pub use migrate::{revert_migrations, run_migrations, run_migrations_from, MigrateError};
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::{PgNoteRepository, PgSessionRepository, PgUserRepository};
