//! # Bistro Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Server                                    │
//! │                                                                         │
//! │  Web client ───► HTTP (3000) /api/v1 ───► Services ───► SQLite          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use bistro_db::{Database, DbConfig};
use bistro_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG overrides the default filter)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting Bistro POS server...");

    // Load configuration
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.port,
        database = %config.database_path,
        environment = %config.environment,
        "Configuration loaded"
    );

    // Open database (migrations run on connect)
    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("Failed to open database")?;
    info!("Database ready");

    let addr = config.listen_addr();
    let app = build_router(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

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
