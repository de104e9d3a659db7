//! roster-api - person registration record store
//!
//! Serves the registration form backend, the person list, and the dashboard
//! statistics over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use roster_api::config::{default_log_filter, ServerConfig, ServerOverrides, StoreLocation};
use roster_api::{build_router, AppState};
use roster_common::config::TomlConfig;
use roster_common::db;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "roster-api")]
#[command(about = "Person registration record store")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Store connection URL (defaults to a file under the root folder)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database file stem used when no URL is given
    #[arg(long, env = "DB_NAME")]
    db_name: Option<String>,

    /// Root folder for the database file and uploads
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Directory for stored photos
    #[arg(long)]
    uploads_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = TomlConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let config = ServerConfig::resolve(
        ServerOverrides {
            port: args.port,
            database_url: args.database_url,
            db_name: args.db_name,
            root_folder: args.root_folder,
            uploads_dir: args.uploads_dir,
        },
        &loaded.config,
    );

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(&config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting roster-api v{} on port {}",
        env!("CARGO_PKG_VERSION"),
        config.port
    );
    loaded.log();
    info!("Root folder: {}", config.root_folder.display());

    let pool = match &config.store {
        StoreLocation::File(path) => {
            info!("Database path: {}", path.display());
            db::init_database(path).await
        }
        StoreLocation::Url(url) => db::connect(url).await,
    }
    .context("Failed to open record store")?;

    tokio::fs::create_dir_all(&config.uploads_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.uploads_dir.display()))?;
    info!("Uploads directory: {}", config.uploads_dir.display());

    let app = build_router(AppState::new(pool, config.uploads_dir.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("roster-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
