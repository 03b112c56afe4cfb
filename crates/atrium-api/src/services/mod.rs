//! Domain services
//!
//! `media_entity` implements the write protocol shared by every entity kind
//! that owns blobs; `entities` supplies the per-kind mapping.

pub mod cleanup;
pub mod entities;
pub mod media_entity;

pub use cleanup::BlobCleanup;
pub use entities::{Ads, Documents, Members, SiteSettings, Testimonials};
pub use media_entity::{
    MediaChanges, MediaEntity, MediaEntityError, MediaEntityService, MediaUrls, SlotUpload,
};
