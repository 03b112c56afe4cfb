//! Test helpers for service and HTTP tests
//!
//! In-memory blob and record stores that share one [`CallLog`], so tests can
//! assert the exact order in which the protocol touched each store. No
//! database or bucket is needed.

pub mod mock_repositories;
pub mod mock_storage;

pub use mock_repositories::{HasId, MockRecordStore, MockUserStore};
pub use mock_storage::{MockBlobStore, MOCK_BASE_URL};

use crate::state::{AppState, ContentStores};
use atrium_core::models::{Ad, Document, Member, NewSiteSetting, SiteSetting, Testimonial};
use atrium_core::{BaseConfig, CleanupMode, Config, ContentConfig, StorageBackend};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

/// A valid development configuration using local storage under `storage_path`.
pub fn test_config(storage_path: &str) -> Config {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Config(Box::new(ContentConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: list(&["http://localhost:3000"]),
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
            environment: "test".to_string(),
            log_format: "compact".to_string(),
        },
        database_url: "postgres://localhost/atrium_test".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        s3_public_base_url: None,
        aws_region: None,
        local_storage_path: Some(storage_path.to_string()),
        local_storage_base_url: Some(MOCK_BASE_URL.to_string()),
        blob_cleanup_mode: CleanupMode::Inline,
        max_image_size_bytes: 1024 * 1024,
        image_allowed_extensions: list(&["jpg", "jpeg", "png", "ico"]),
        image_allowed_content_types: list(&["image/jpeg", "image/png", "image/x-icon"]),
        max_document_size_bytes: 2 * 1024 * 1024,
        document_allowed_extensions: list(&["pdf"]),
        document_allowed_content_types: list(&["application/pdf"]),
        admin_email: None,
        admin_password: None,
    }))
}

/// Application state over in-memory stores, with handles to every fake.
pub struct TestApp {
    pub state: Arc<AppState>,
    pub log: CallLog,
    pub blobs: Arc<MockBlobStore>,
    pub users: Arc<MockUserStore>,
    pub testimonials: Arc<MockRecordStore<Testimonial>>,
    pub members: Arc<MockRecordStore<Member>>,
    pub documents: Arc<MockRecordStore<Document>>,
    pub ads: Arc<MockRecordStore<Ad>>,
    pub site_settings: Arc<MockRecordStore<SiteSetting>>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_blobs(MockBlobStore::new)
    }

    /// Build with a customised blob store, e.g. scripted keys.
    pub fn with_blobs(make_blobs: impl FnOnce(CallLog) -> MockBlobStore) -> Self {
        let log = CallLog::new();
        let blobs = Arc::new(make_blobs(log.clone()));
        let users = Arc::new(MockUserStore::new());
        let testimonials = Arc::new(MockRecordStore::new(log.clone()));
        let members = Arc::new(MockRecordStore::new(log.clone()));
        let documents = Arc::new(MockRecordStore::new(log.clone()));
        let ads = Arc::new(MockRecordStore::new(log.clone()));
        let site_settings = Arc::new(MockRecordStore::new(log.clone()));
        site_settings.seed(SiteSetting::new(NewSiteSetting {
            site_name: "Atrium".to_string(),
            ..Default::default()
        }));

        let stores = ContentStores {
            testimonials: testimonials.clone(),
            members: members.clone(),
            documents: documents.clone(),
            ads: ads.clone(),
            site_settings: site_settings.clone(),
        };
        let state = Arc::new(AppState::new(
            test_config("/tmp/atrium-test"),
            None,
            users.clone(),
            blobs.clone(),
            stores,
        ));

        Self {
            state,
            log,
            blobs,
            users,
            testimonials,
            members,
            documents,
            ads,
            site_settings,
        }
    }

    pub fn router(&self) -> axum::Router {
        crate::setup::routes::setup_routes(&self.state.config, self.state.clone())
            .expect("test router")
    }

    /// Create an editor account and return a bearer token for it.
    pub fn editor_token(&self) -> String {
        let user = self
            .users
            .add_user("editor@example.org", "editor-password", "editor");
        self.state.auth.issue(&user).expect("token")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One observed store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    BlobPut { folder: String, key: String },
    BlobDelete { folder: String, key: String },
    RecordCreate,
    RecordUpdate { id: i64 },
    RecordDelete { id: i64 },
}

impl Call {
    pub fn blob_put(folder: &str, key: &str) -> Self {
        Call::BlobPut {
            folder: folder.to_string(),
            key: key.to_string(),
        }
    }

    pub fn blob_delete(folder: &str, key: &str) -> Self {
        Call::BlobDelete {
            folder: folder.to_string(),
            key: key.to_string(),
        }
    }

    pub fn is_blob_delete(&self) -> bool {
        matches!(self, Call::BlobDelete { .. })
    }
}

/// Ordered, shared record of store calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn blob_deletes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_blob_delete)
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Wait until at least `n` calls were logged. Panics after two seconds.
    pub async fn wait_for(&self, n: usize) {
        for _ in 0..200 {
            if self.calls.lock().unwrap().len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected at least {} calls, got {:?}",
            n,
            self.calls.lock().unwrap()
        );
    }
}
