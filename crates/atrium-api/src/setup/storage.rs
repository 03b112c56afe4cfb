//! Storage setup and initialization

use anyhow::{Context, Result};
use atrium_core::Config;
use atrium_storage::{create_storage, BlobStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn BlobStore>> {
    tracing::info!("Initializing blob storage...");
    let blobs = create_storage(config)
        .await
        .context("Failed to initialize blob storage")?;
    tracing::info!(
        backend = %blobs.backend_type(),
        cleanup_mode = %config.blob_cleanup_mode(),
        "Blob storage initialized"
    );
    Ok(blobs)
}
