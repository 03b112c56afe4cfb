//! In-memory blob store for testing

use async_trait::async_trait;
use atrium_core::StorageBackend;
use atrium_storage::keys::generate_blob_key;
use atrium_storage::{BlobStore, MediaFolder, StorageError, StorageResult, UploadIntent};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{Call, CallLog};

pub const MOCK_BASE_URL: &str = "https://cdn.test";

/// Blob store backed by a `HashMap` keyed by `folder/key`.
///
/// Keys can be scripted with [`MockBlobStore::with_keys`]; otherwise they are
/// generated the way real backends do. Successful puts and every delete
/// attempt are written to the shared [`CallLog`].
#[derive(Clone)]
pub struct MockBlobStore {
    log: CallLog,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    scripted_keys: Arc<Mutex<VecDeque<String>>>,
    puts: Arc<AtomicUsize>,
    fail_puts_from: Arc<Mutex<Option<usize>>>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockBlobStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            blobs: Arc::new(Mutex::new(HashMap::new())),
            scripted_keys: Arc::new(Mutex::new(VecDeque::new())),
            puts: Arc::new(AtomicUsize::new(0)),
            fail_puts_from: Arc::new(Mutex::new(None)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Hand out these keys, in order, before generating any.
    pub fn with_keys(self, keys: &[&str]) -> Self {
        self.scripted_keys
            .lock()
            .unwrap()
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    /// Every put fails.
    pub fn fail_puts(&self) {
        self.fail_puts_from(0);
    }

    /// Puts succeed `n` times, then fail.
    pub fn fail_puts_from(&self, n: usize) {
        *self.fail_puts_from.lock().unwrap() = Some(n);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Place a blob directly, without logging.
    pub fn seed(&self, folder: &MediaFolder, key: &str) {
        self.blobs
            .lock()
            .unwrap()
            .insert(format!("{}/{}", folder, key), b"seed".to_vec());
    }

    pub fn contains(&self, folder: &MediaFolder, key: &str) -> bool {
        self.blobs
            .lock()
            .unwrap()
            .contains_key(&format!("{}/{}", folder, key))
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, folder: &MediaFolder, upload: UploadIntent) -> StorageResult<String> {
        let attempt = self.puts.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = *self.fail_puts_from.lock().unwrap() {
            if attempt >= limit {
                return Err(StorageError::UploadFailed(
                    "mock bucket unavailable".to_string(),
                ));
            }
        }

        let key = self
            .scripted_keys
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| generate_blob_key(&upload.filename));

        self.blobs
            .lock()
            .unwrap()
            .insert(format!("{}/{}", folder, key), upload.data);
        self.log.record(Call::blob_put(&folder.to_string(), &key));
        Ok(key)
    }

    async fn delete(&self, folder: &MediaFolder, key: &str) -> StorageResult<()> {
        self.log.record(Call::blob_delete(&folder.to_string(), key));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed(
                "mock bucket unavailable".to_string(),
            ));
        }
        self.blobs
            .lock()
            .unwrap()
            .remove(&format!("{}/{}", folder, key));
        Ok(())
    }

    fn url_for(&self, folder: &MediaFolder, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        format!("{}/{}/{}", MOCK_BASE_URL, folder, key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_keys_are_used_in_order() {
        let log = CallLog::new();
        let blobs = MockBlobStore::new(log.clone()).with_keys(&["a.jpg", "b.jpg"]);

        let first = blobs
            .put(&MediaFolder::Members, UploadIntent::new("x.jpg", "image/jpeg", vec![1]))
            .await
            .unwrap();
        let second = blobs
            .put(&MediaFolder::Members, UploadIntent::new("y.jpg", "image/jpeg", vec![2]))
            .await
            .unwrap();

        assert_eq!((first.as_str(), second.as_str()), ("a.jpg", "b.jpg"));
        assert!(blobs.contains(&MediaFolder::Members, "a.jpg"));
    }

    #[tokio::test]
    async fn put_threshold_fails_later_puts() {
        let blobs = MockBlobStore::new(CallLog::new());
        blobs.fail_puts_from(1);

        let upload = || UploadIntent::new("x.png", "image/png", vec![0]);
        assert!(blobs.put(&MediaFolder::Ads, upload()).await.is_ok());
        assert!(blobs.put(&MediaFolder::Ads, upload()).await.is_err());
        assert_eq!(blobs.len(), 1);
    }
}
