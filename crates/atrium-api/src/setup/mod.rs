//! Application setup and initialization
//!
//! Everything main.rs needs to go from a `Config` to a served router.

pub mod bootstrap;
pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use atrium_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    config.validate().context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let blobs = storage::setup_storage(&config).await?;
    let state = services::initialize_services(&config, pool, blobs);

    bootstrap::ensure_admin(&config, state.users.as_ref()).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
