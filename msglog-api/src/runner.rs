use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use middleware::SecretKeyConfig;
use msglog_core::init_tracing;
use storage::{simulate, MessageRepository, SimulationReport};

use crate::config::ApiConfig;
use crate::router::{create_router, AppState, SimulationLimits};

/// Opens the configured database (creating the schema when missing).
pub async fn open_repository(config: &ApiConfig) -> Result<MessageRepository> {
    MessageRepository::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("Open message database {}", config.database_url))
}

/// Builds the router for `config` on top of an opened repository.
pub fn build_app(config: &ApiConfig, repo: MessageRepository) -> axum::Router {
    let state = AppState::new(
        Arc::new(repo),
        SimulationLimits {
            max_count: config.max_simulate_count,
            window: config.simulate_window(),
        },
    );
    create_router(state, Arc::new(SecretKeyConfig::new(config.secret_key.clone())))
}

/// Main entry: validate config, init logging, open the store, then serve until Ctrl-C.
pub async fn run_server(config: ApiConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file, &config.log_level)?;

    info!(
        database_url = %config.database_url,
        bind_addr = %config.bind_addr,
        "Starting message log API"
    );

    let repo = open_repository(&config).await?;
    let app = build_app(&config, repo);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Bind {}", config.bind_addr))?;
    info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("API server stopped");
    Ok(())
}

/// Inserts `count` synthetic messages directly into the configured database.
#[instrument(skip(config))]
pub async fn run_simulation(config: &ApiConfig, count: u32) -> Result<SimulationReport> {
    config.validate()?;
    if count == 0 || count > config.max_simulate_count {
        anyhow::bail!("Count must be between 1 and {}", config.max_simulate_count);
    }

    let repo = open_repository(config).await?;
    let report = simulate(&repo, count, config.simulate_window()).await?;
    Ok(report)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
