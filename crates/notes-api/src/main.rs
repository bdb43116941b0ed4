//! Notes API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p notes-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`). When
//! `NOTES_CONFIG` names a file, it is loaded instead, with `NOTES__`-prefixed
//! variables taking precedence.

use notes_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let loaded = match std::env::var("NOTES_CONFIG") {
        Ok(path) => AppConfig::load(path),
        Err(_) => AppConfig::from_env(),
    };

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting Notes API Server..."
    );

    if let Err(e) = notes_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
