//! Schema migrations
//!
//! Migrations are read from disk at runtime with `sqlx::migrate::Migrator`.
//! Each migration is reversible (`.up.sql` / `.down.sql`).

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

/// Migrations shipped with this crate
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Migration errors
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations from the bundled directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    run_migrations_from(pool, Path::new(MIGRATIONS_DIR)).await
}

/// Apply all pending migrations from `dir`
pub async fn run_migrations_from(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;
    info!(count = migrator.iter().count(), "Migrations applied");
    Ok(())
}

/// Revert every applied migration from `dir`
pub async fn revert_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.undo(pool, 0).await?;
    info!("Migrations reverted");
    Ok(())
}
