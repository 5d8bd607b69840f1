//! luxserver - collection search service
//!
//! Listens on the given port and answers one JSON filter request per
//! connection from a read-only collection database.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use lux_server::config::ServerConfig;
use lux_server::{db, server, AppState};

/// Command-line arguments for luxserver
#[derive(Parser, Debug)]
#[command(name = "luxserver")]
#[command(about = "Server for the YUAG collection search application")]
#[command(version)]
struct Args {
    /// the port at which the server should listen
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors go to stderr with a non-zero exit before anything else runs
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!(
        "Starting luxserver v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = ServerConfig::resolve().context("Failed to load configuration")?;
    info!("Database path: {}", config.database_path.display());

    let pool = match db::connect_readonly(&config.database_path, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e).context("Database unavailable");
        }
    };

    let listener = server::bind(args.port)
        .await
        .with_context(|| format!("Error binding to port {}", args.port))?;
    info!("Server listening on port {}...", args.port);

    let state = AppState::new(pool, &config);
    server::serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
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
