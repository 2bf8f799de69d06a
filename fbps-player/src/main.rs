//! fbps-player - Fantasy Baseball player service
//!
//! Serves the player list and accepts player upserts over HTTP, backed by a
//! SQLite database in the configured root folder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fbps_common::config::{CliOverrides, ServiceConfig};
use fbps_player::{build_router, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "fbps-player", version, about = "Fantasy Baseball player service")]
struct Args {
    /// Folder holding the player database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Address to bind the HTTP listener to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind the HTTP listener to
    #[arg(short, long)]
    port: Option<u16>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            root_folder: args.root_folder,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: CliOverrides = Args::parse().into();

    let (config, config_source) = ServiceConfig::load(&cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting Fantasy Baseball Player Service (fbps-player) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.log();

    config
        .ensure_root_folder()
        .context("Failed to create root folder")?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match fbps_common::db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(pool));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("fbps-player listening on http://{}", address);
    info!("Health check: http://{}/api/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
