//! Roombook server entry point.

use anyhow::{Context, Result};
use roombook_db::{DbManager, run_migrations};
use roombook_server::{AppConfig, AppState, build_router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "roombook=info".into());

    let subscriber = tracing_subscriber::fmt::layer()
        .json()
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    if config.uses_default_secret() {
        tracing::warn!("ROOMBOOK_JWT_SECRET is not set; using the development secret");
    }

    let db = DbManager::connect(&config.db)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(db.client())
        .await
        .context("Failed to apply migrations")?;

    let state = AppState::new(db.client().clone(), config.auth.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error.message = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
