//! Mock repository implementations for testing
//!
//! These mocks allow testing the entity services and handlers without a
//! database.

use async_trait::async_trait;
use atrium_core::models::{Ad, Document, Member, SiteSetting, Testimonial, User};
use atrium_core::AppError;
use atrium_db::{RecordStore, UserStore};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use super::{Call, CallLog};
use crate::auth::password::hash_password;

/// Records the mock store can key by id.
pub trait HasId {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! has_id {
    ($($ty:ty),*) => {
        $(impl HasId for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

has_id!(Testimonial, Member, Document, Ad, SiteSetting);

fn simulated_outage() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

/// In-memory record store. Writes are logged on attempt, before any
/// injected failure is returned.
#[derive(Clone)]
pub struct MockRecordStore<R> {
    log: CallLog,
    rows: Arc<Mutex<BTreeMap<i64, R>>>,
    next_id: Arc<AtomicI64>,
    fail_find: Arc<AtomicBool>,
    fail_create: Arc<AtomicBool>,
    fail_update: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
}

impl<R: HasId + Clone> MockRecordStore<R> {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            rows: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            fail_find: Arc::new(AtomicBool::new(false)),
            fail_create: Arc::new(AtomicBool::new(false)),
            fail_update: Arc::new(AtomicBool::new(false)),
            fail_delete: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert a row directly, without logging.
    pub fn seed(&self, record: R) {
        let id = record.id();
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        self.rows.lock().unwrap().insert(id, record);
    }

    pub fn get(&self, id: i64) -> Option<R> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fail_find(&self, fail: bool) {
        self.fail_find.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<R> RecordStore<R> for MockRecordStore<R>
where
    R: HasId + Clone + Send + Sync + 'static,
{
    async fn find(&self, id: i64) -> Result<Option<R>, AppError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        Ok(self.get(id))
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, mut record: R) -> Result<R, AppError> {
        self.log.record(Call::RecordCreate);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        if record.id() == 0 {
            record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: &R) -> Result<(), AppError> {
        let id = record.id();
        self.log.record(Call::RecordUpdate { id });
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("row {} not found", id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.log.record(Call::RecordDelete { id });
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        match self.rows.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("row {} not found", id))),
        }
    }
}

/// In-memory user store. Passwords are hashed with the production hasher.
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str, password: &str, role: &str) -> User {
        let hash = hash_password(password).unwrap();
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            password_hash: hash,
            name: None,
            role: role.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        user
    }

    pub fn deactivate(&self, id: i64) {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
        role: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.map(String::from),
            role: role.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }
}
