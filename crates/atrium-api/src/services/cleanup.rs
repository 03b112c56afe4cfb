//! Best-effort removal of blobs no persisted record points to.
//!
//! A discard never fails the caller: errors are logged at `warn` and the blob
//! is left orphaned.

use atrium_core::CleanupMode;
use atrium_storage::{BlobStore, MediaFolder};
use std::sync::Arc;

#[derive(Clone)]
pub struct BlobCleanup {
    blobs: Arc<dyn BlobStore>,
    mode: CleanupMode,
}

impl BlobCleanup {
    pub fn new(blobs: Arc<dyn BlobStore>, mode: CleanupMode) -> Self {
        Self { blobs, mode }
    }

    pub fn mode(&self) -> CleanupMode {
        self.mode
    }

    /// Delete `key` from `folder`. Inline mode awaits the delete; background
    /// mode hands it to the runtime and returns immediately.
    pub async fn discard(&self, folder: &MediaFolder, key: &str, reason: &'static str) {
        let blobs = self.blobs.clone();
        let folder = *folder;
        let key = key.to_string();

        match self.mode {
            CleanupMode::Inline => remove_blob(blobs, folder, key, reason).await,
            CleanupMode::Background => {
                tokio::spawn(remove_blob(blobs, folder, key, reason));
            }
        }
    }
}

async fn remove_blob(
    blobs: Arc<dyn BlobStore>,
    folder: MediaFolder,
    key: String,
    reason: &'static str,
) {
    match blobs.delete(&folder, &key).await {
        Ok(()) => {
            tracing::debug!(
                folder = %folder,
                storage_key = %key,
                reason,
                "Discarded blob"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                folder = %folder,
                storage_key = %key,
                reason,
                "Failed to discard blob; leaving it orphaned"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{Call, CallLog, MockBlobStore};

    #[tokio::test]
    async fn inline_discard_deletes_before_returning() {
        let log = CallLog::new();
        let blobs = Arc::new(MockBlobStore::new(log.clone()));
        let cleanup = BlobCleanup::new(blobs, CleanupMode::Inline);

        cleanup.discard(&MediaFolder::Ads, "a.png", "test").await;

        assert_eq!(log.calls(), vec![Call::blob_delete("ads", "a.png")]);
    }

    #[tokio::test]
    async fn failed_discard_is_swallowed() {
        let log = CallLog::new();
        let blobs = Arc::new(MockBlobStore::new(log.clone()));
        blobs.fail_deletes(true);
        let cleanup = BlobCleanup::new(blobs, CleanupMode::Inline);

        cleanup.discard(&MediaFolder::Members, "m.jpg", "test").await;

        assert_eq!(log.calls(), vec![Call::blob_delete("members", "m.jpg")]);
    }

    #[tokio::test]
    async fn background_discard_eventually_deletes() {
        let log = CallLog::new();
        let blobs = Arc::new(MockBlobStore::new(log.clone()));
        let cleanup = BlobCleanup::new(blobs, CleanupMode::Background);

        cleanup.discard(&MediaFolder::Settings, "logo.svg", "test").await;

        log.wait_for(1).await;
        assert_eq!(log.calls(), vec![Call::blob_delete("settings", "logo.svg")]);
    }
}
