use crate::keys::{generate_blob_key, object_path};
use crate::traits::{BlobStore, StorageError, StorageResult, UploadIntent};
use crate::{MediaFolder, StorageBackend};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem blob store
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "/var/lib/atrium/media")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:4000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Filesystem path of a blob. Folder and key are validated by `object_path`,
    /// so the result always stays under `base_path`.
    fn blob_path(&self, folder: &MediaFolder, key: &str) -> StorageResult<PathBuf> {
        let relative = object_path(folder, key)?;
        Ok(self.base_path.join(relative))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

/// Write `data` to a new file at `path`. Flushes before syncing, since tokio
/// reports a failed buffered write only on the next write or flush.
async fn write_blob(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Write the blob, removing any partial file when the write fails.
async fn store_blob(path: &Path, data: &[u8]) -> StorageResult<()> {
    let Err(e) = write_blob(path, data).await else {
        return Ok(());
    };

    if let Err(remove_err) = fs::remove_file(path).await {
        if remove_err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                error = %remove_err,
                path = %path.display(),
                "Failed to remove partial upload"
            );
        }
    }

    Err(StorageError::UploadFailed(format!(
        "Failed to write file {}: {}",
        path.display(),
        e
    )))
}

#[async_trait]
impl BlobStore for LocalStorage {
    async fn put(&self, folder: &MediaFolder, upload: UploadIntent) -> StorageResult<String> {
        let key = generate_blob_key(&upload.filename);
        let path = self.blob_path(folder, &key)?;
        let size = upload.size();

        self.ensure_parent_dir(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to prepare {}: {}", path.display(), e))
        })?;

        let start = std::time::Instant::now();

        store_blob(&path, &upload.data).await?;

        tracing::info!(
            path = %path.display(),
            folder = %folder,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(key)
    }

    async fn delete(&self, folder: &MediaFolder, key: &str) -> StorageResult<()> {
        let path = self.blob_path(folder, key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            folder = %folder,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    fn url_for(&self, folder: &MediaFolder, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), folder, key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
