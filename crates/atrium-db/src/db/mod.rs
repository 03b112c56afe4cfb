//! Database repositories for data access layer
//!
//! Repositories are organized into content/ (the media-backed entities) and
//! control/ (users). Content repositories know nothing about blobs: they store
//! and return keys only.

// Generic record store contract
pub mod record_store;
//
// Content repositories (testimonials, members, documents, ads, site settings)
pub mod content;
//
// Back-office accounts
pub mod control;

pub use content::{
    AdRepository, DocumentRepository, MemberRepository, SiteSettingRepository,
    TestimonialRepository,
};
pub use control::{UserRepository, UserStore};
pub use record_store::RecordStore;
