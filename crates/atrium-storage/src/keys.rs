//! Shared key generation and validation for storage backends.
//!
//! Key format: `<uuid-v4>.<ext>`, one path segment. Object path: `<folder>/<key>`.

use crate::{MediaFolder, StorageError, StorageResult};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;
const FALLBACK_EXTENSION: &str = "bin";

/// Lowercased extension of `filename`, or `bin` when it has none or it looks unsafe.
pub fn sanitized_extension(filename: &str) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(stem, ext)| if stem.is_empty() { "" } else { ext })
        .unwrap_or("");

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return FALLBACK_EXTENSION.to_string();
    }

    ext.to_ascii_lowercase()
}

/// Generate a fresh blob key for an upload named `filename`.
pub fn generate_blob_key(filename: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), sanitized_extension(filename))
}

/// A key is a single, non-empty path segment.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Full object path of a blob inside the backend.
pub fn object_path(folder: &MediaFolder, key: &str) -> StorageResult<String> {
    validate_key(key)?;
    let folder = folder.as_path();
    if folder.starts_with('/') || folder.split('/').any(|s| s.is_empty() || s == "..") {
        return Err(StorageError::InvalidKey(format!(
            "Invalid storage folder: {}",
            folder
        )));
    }
    Ok(format!("{}/{}", folder, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::models::DocumentType;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(sanitized_extension("Portrait.JPG"), "jpg");
        assert_eq!(sanitized_extension("annual.report.pdf"), "pdf");
    }

    #[test]
    fn extension_falls_back_to_bin() {
        assert_eq!(sanitized_extension("README"), "bin");
        assert_eq!(sanitized_extension(".hidden"), "bin");
        assert_eq!(sanitized_extension("x.j%g"), "bin");
        assert_eq!(sanitized_extension("x.averyverylongext"), "bin");
    }

    #[test]
    fn generated_keys_are_unique_single_segments() {
        let a = generate_blob_key("photo.png");
        let b = generate_blob_key("photo.png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(validate_key(&a).is_ok());
    }

    #[test]
    fn object_path_joins_folder_and_key() {
        let path = object_path(&MediaFolder::Documents(DocumentType::Form), "a.pdf").unwrap();
        assert_eq!(path, "documents/form/a.pdf");
    }

    #[test]
    fn traversal_keys_are_rejected() {
        assert!(object_path(&MediaFolder::Members, "../secrets").is_err());
        assert!(object_path(&MediaFolder::Members, "a/b.jpg").is_err());
        assert!(object_path(&MediaFolder::Members, "").is_err());
    }
}
