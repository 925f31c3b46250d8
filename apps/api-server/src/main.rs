//! # Storefront API Server
//!
//! HTTP front end exposing the named store operations over JSON.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server                                       │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► ops handlers ───► CartEngine / Catalog   │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                            SqliteStore → SQLite        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod ops;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_db::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::ops::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Storefront API server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // Build router over shared state
    let state = AppState { db: db.clone() };
    let app = ops::router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
