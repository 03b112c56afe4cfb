//! Application state shared by every handler.

use crate::auth::AuthContext;
use crate::services::{
    Ads, BlobCleanup, Documents, MediaEntityService, Members, SiteSettings, Testimonials,
};
use crate::utils::upload::UploadLimits;
use atrium_core::models::{Ad, Document, Member, SiteSetting, Testimonial};
use atrium_core::Config;
use atrium_db::{RecordStore, UserStore};
use atrium_storage::BlobStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Record stores for the five content kinds.
pub struct ContentStores {
    pub testimonials: Arc<dyn RecordStore<Testimonial>>,
    pub members: Arc<dyn RecordStore<Member>>,
    pub documents: Arc<dyn RecordStore<Document>>,
    pub ads: Arc<dyn RecordStore<Ad>>,
    pub site_settings: Arc<dyn RecordStore<SiteSetting>>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the stores are not Postgres-backed; health reports the
    /// database as unchecked.
    pub pool: Option<PgPool>,
    pub auth: Arc<AuthContext>,
    pub users: Arc<dyn UserStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub limits: UploadLimits,
    pub testimonials: MediaEntityService<Testimonials>,
    pub members: MediaEntityService<Members>,
    pub documents: MediaEntityService<Documents>,
    pub ads: MediaEntityService<Ads>,
    pub site_settings: MediaEntityService<SiteSettings>,
}

impl AppState {
    pub fn new(
        config: Config,
        pool: Option<PgPool>,
        users: Arc<dyn UserStore>,
        blobs: Arc<dyn BlobStore>,
        stores: ContentStores,
    ) -> Self {
        let cleanup = BlobCleanup::new(blobs.clone(), config.blob_cleanup_mode());
        let auth = Arc::new(AuthContext::from_config(&config));
        let limits = UploadLimits::from_config(&config);

        Self {
            testimonials: MediaEntityService::new(
                stores.testimonials,
                blobs.clone(),
                cleanup.clone(),
            ),
            members: MediaEntityService::new(stores.members, blobs.clone(), cleanup.clone()),
            documents: MediaEntityService::new(stores.documents, blobs.clone(), cleanup.clone()),
            ads: MediaEntityService::new(stores.ads, blobs.clone(), cleanup.clone()),
            site_settings: MediaEntityService::new(stores.site_settings, blobs.clone(), cleanup),
            config,
            pool,
            auth,
            users,
            blobs,
            limits,
        }
    }
}
