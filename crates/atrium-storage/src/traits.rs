//! Blob store abstraction trait
//!
//! This module defines the `BlobStore` trait that all storage backends implement.
//! A blob store is never transactional with the record store; callers sequence
//! the two and compensate on failure.

use crate::{MediaFolder, StorageBackend};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Raw upload content, consumed once by `BlobStore::put`.
#[derive(Debug, Clone)]
pub struct UploadIntent {
    /// Filename as sent by the client; only its extension is kept.
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadIntent {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Blob store abstraction
///
/// Backends generate the key on `put` and return it; callers persist the key,
/// never the URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the content under `folder` and return the generated key.
    async fn put(&self, folder: &MediaFolder, upload: UploadIntent) -> StorageResult<String>;

    /// Delete a blob. Deleting a blob that does not exist succeeds.
    async fn delete(&self, folder: &MediaFolder, key: &str) -> StorageResult<()>;

    /// Public URL of a blob. Pure; an empty key yields an empty string.
    fn url_for(&self, folder: &MediaFolder, key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// URL for an optional media reference; `None` when there is no blob.
    fn media_url(&self, folder: &MediaFolder, key: Option<&str>) -> Option<String> {
        match key {
            Some(key) if !key.is_empty() => Some(self.url_for(folder, key)),
            _ => None,
        }
    }
}
