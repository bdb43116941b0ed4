//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use notes_common::{AppConfig, AppError, JwtService, PasswordService, SpellCheckerConfig};
use notes_core::traits::{NoteRepository, SessionRepository, SpellChecker, UserRepository};
use notes_db::{
    create_pool, run_migrations, InMemoryNoteRepository, InMemorySessionRepository,
    InMemoryUserRepository, PgNoteRepository, PgPool, PgSessionRepository, PgUserRepository,
    PoolConfig,
};
use notes_service::{HttpSpellChecker, NoopSpellChecker, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(
        router,
        &config.api,
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Connect to PostgreSQL, apply migrations, and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let stores = Stores {
        user_repo: Arc::new(PgUserRepository::new(pool.clone())),
        session_repo: Arc::new(PgSessionRepository::new(pool.clone())),
        note_repo: Arc::new(PgNoteRepository::new(pool.clone())),
    };

    build_state(config, stores, Some(pool))
}

/// Create AppState backed by in-process stores
///
/// Nothing survives a restart; used by tests and database-less runs.
pub fn create_in_memory_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let stores = Stores {
        user_repo: Arc::new(InMemoryUserRepository::new()),
        session_repo: Arc::new(InMemorySessionRepository::new()),
        note_repo: Arc::new(InMemoryNoteRepository::new()),
    };

    build_state(config, stores, None)
}

struct Stores {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    note_repo: Arc<dyn NoteRepository>,
}

fn build_state(
    config: AppConfig,
    stores: Stores,
    pool: Option<PgPool>,
) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let password_service = Arc::new(PasswordService::new(&config.hasher)?);
    let spell_checker = create_spell_checker(&config.spell_checker)?;

    let mut builder = ServiceContextBuilder::new()
        .user_repo(stores.user_repo)
        .session_repo(stores.session_repo)
        .note_repo(stores.note_repo)
        .spell_checker(spell_checker)
        .jwt_service(jwt_service)
        .password_service(password_service);
    if let Some(pool) = pool {
        builder = builder.pool(pool);
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

fn create_spell_checker(config: &SpellCheckerConfig) -> Result<Arc<dyn SpellChecker>, AppError> {
    match &config.url {
        Some(url) => {
            info!(url = %url, "Spell checking enabled");
            Ok(Arc::new(HttpSpellChecker::new(url.clone(), config.timeout_secs)?))
        }
        None => {
            warn!("SPELL_CHECKER_URL not set, spell checking disabled");
            Ok(Arc::new(NoopSpellChecker))
        }
    }
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
