//! Schema migration runner
//!
//! ```bash
//! cargo run -p notes-db --bin notes-migrator                      # apply
//! cargo run -p notes-db --bin notes-migrator -- --down            # revert all
//! cargo run -p notes-db --bin notes-migrator -- --migrations-path ./migrations
//! ```
//!
//! Connection settings come from the same `DATABASE_URL` / `POSTGRES_*`
//! variables as the server.

use std::path::PathBuf;

use notes_common::{try_init_tracing, DatabaseConfig};
use notes_db::{create_pool, revert_migrations, run_migrations_from, PoolConfig};
use tracing::{error, info};

struct Args {
    migrations_path: PathBuf,
    down: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        migrations_path: PathBuf::from(notes_db::migrate::MIGRATIONS_DIR),
        down: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--down" => args.down = true,
            "--migrations-path" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--migrations-path requires a value".to_string())?;
                args.migrations_path = PathBuf::from(path);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(args)
}

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Migration failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    let config = DatabaseConfig::from_env()?;
    let pool = create_pool(&PoolConfig::from(&config)).await?;

    if args.down {
        info!(path = %args.migrations_path.display(), "Reverting migrations");
        revert_migrations(&pool, &args.migrations_path).await?;
    } else {
        info!(path = %args.migrations_path.display(), "Applying migrations");
        run_migrations_from(&pool, &args.migrations_path).await?;
    }

    Ok(())
}
