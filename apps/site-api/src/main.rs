//! # Taraang Site API
//!
//! Serves the contact form and gallery endpoints for the public site.
//!
//! ## Environment Variables
//! - `SITE_PORT` (default 8080)
//! - `DATABASE_PATH` (default `taraang-site.db`)
//! - `LLM_ENDPOINT`, `LLM_API_KEY`, `LLM_MODEL`
//! - `MAIL_RELAY_URL`, `MAIL_FROM`, `OPERATOR_EMAIL`
//! - `RUST_LOG` (default `info,taraang=debug,sqlx=warn`)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taraang_db::{Database, DbConfig};
use taraang_site_api::{router, AppState, SiteConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,taraang=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting Taraang site API...");

    // Load configuration
    let config = SiteConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path,
        model = %config.llm_model,
        "Configuration loaded"
    );

    // Open the database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    let state = Arc::new(AppState::from_config(db.clone(), &config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Site API listening");

    axum::serve(listener, router(state))
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
