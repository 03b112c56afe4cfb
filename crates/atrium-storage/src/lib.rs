//! Atrium Storage Library
//!
//! This crate provides the blob store abstraction used by the content services,
//! with implementations for S3 (via `object_store`) and the local filesystem.
//!
//! # Key format
//!
//! Blobs are addressed by a folder and a key. The folder is derived from the
//! entity kind (`testimonials`, `members`, `documents/<type>`, `settings`, `ads`);
//! the key is generated on upload as `<uuid>.<ext>`. The object path inside a
//! backend is always `<folder>/<key>`.
//!
//! Records only ever store keys; URLs are computed on read with `url_for`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use atrium_core::models::MediaFolder;
pub use atrium_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{BlobStore, StorageError, StorageResult, UploadIntent};
