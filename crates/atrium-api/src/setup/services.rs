//! Repository wiring and application state setup

use crate::state::{AppState, ContentStores};
use atrium_core::Config;
use atrium_db::{
    AdRepository, DocumentRepository, MemberRepository, SiteSettingRepository,
    TestimonialRepository, UserRepository,
};
use atrium_storage::BlobStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Build the Postgres-backed application state.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    blobs: Arc<dyn BlobStore>,
) -> Arc<AppState> {
    let stores = ContentStores {
        testimonials: Arc::new(TestimonialRepository::new(pool.clone())),
        members: Arc::new(MemberRepository::new(pool.clone())),
        documents: Arc::new(DocumentRepository::new(pool.clone())),
        ads: Arc::new(AdRepository::new(pool.clone())),
        site_settings: Arc::new(SiteSettingRepository::new(pool.clone())),
    };
    let users = Arc::new(UserRepository::new(pool.clone()));

    tracing::info!("Content services initialized");
    Arc::new(AppState::new(
        config.clone(),
        Some(pool),
        users,
        blobs,
        stores,
    ))
}
