//! Duty Manager - a small CRUD service for duties
//!
//! Serves the duties REST API backed by PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duty_manager::api::{create_router, AppState};
use duty_manager::repository::{ensure_schema, PgDutyRepository};
use duty_manager::{spawn_cleanup_task, Config};

/// Main entry point for the duties API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to PostgreSQL and make sure the `duties` table exists
/// 4. Start background cache sweep
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duty_manager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Duty Manager");

    let config = Config::from_env();
    info!(
        "Configuration loaded: db={}@{}:{}/{}, port={}, cache_ttl={}s, cache_max_entries={}",
        config.db_user,
        config.db_host,
        config.db_port,
        config.db_name,
        config.server_port,
        config.cache_ttl,
        config.cache_max_entries
    );

    let repo = PgDutyRepository::connect(&config)
        .await
        .context("failed to connect to the duties database")?;
    ensure_schema(repo.pool())
        .await
        .context("failed to prepare the duties table")?;
    info!("Database connection established");

    let state = AppState::from_config(Arc::new(repo.clone()), &config);

    let cleanup_handle = spawn_cleanup_task(
        state.clone(),
        Duration::from_secs(config.cleanup_interval.max(1)),
    );

    let app = create_router(state, &config.cors_origin);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Backend listening at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    repo.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cache sweep.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache sweep aborted");
}
