//! Common utilities for upload validation
//!
//! Checks run in the handler, before the entity service is called, so a
//! rejected file never reaches the blob store.

use atrium_core::models::AssetKind;
use atrium_core::{AppError, Config};
use atrium_storage::UploadIntent;

/// Allowed size, extensions and content types for one asset kind.
#[derive(Debug, Clone)]
pub struct AssetRules {
    pub max_size: usize,
    pub extensions: Vec<String>,
    pub content_types: Vec<String>,
}

/// Upload rules for every asset kind, built once from `Config`.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub image: AssetRules,
    pub document: AssetRules,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            image: AssetRules {
                max_size: config.max_image_size_bytes(),
                extensions: config.image_allowed_extensions().to_vec(),
                content_types: config.image_allowed_content_types().to_vec(),
            },
            document: AssetRules {
                max_size: config.max_document_size_bytes(),
                extensions: config.document_allowed_extensions().to_vec(),
                content_types: config.document_allowed_content_types().to_vec(),
            },
        }
    }

    pub fn rules(&self, kind: AssetKind) -> &AssetRules {
        match kind {
            AssetKind::Image => &self.image,
            AssetKind::Document => &self.document,
        }
    }

    /// Largest single file any slot accepts.
    pub fn max_file_size(&self) -> usize {
        self.image.max_size.max(self.document.max_size)
    }

    pub fn check(&self, kind: AssetKind, upload: &UploadIntent) -> Result<(), AppError> {
        let rules = self.rules(kind);
        if upload.data.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "File '{}' is empty",
                upload.filename
            )));
        }
        validate_file_size(upload.size(), rules.max_size)?;
        validate_file_extension(&upload.filename, &rules.extensions)?;
        validate_content_type(&upload.content_type, &rules.content_types)?;
        Ok(())
    }
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Strip MIME parameters ("image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against allowlist, ignoring MIME parameters.
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate file extension and return it lowercased.
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file extension. Allowed extensions: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(extension)
}

/// Keep only the final path component and replace unsafe characters.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        return "file".to_string();
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn limits() -> UploadLimits {
        UploadLimits {
            image: AssetRules {
                max_size: 1024,
                extensions: list(&["jpg", "png"]),
                content_types: list(&["image/jpeg", "image/png"]),
            },
            document: AssetRules {
                max_size: 4096,
                extensions: list(&["pdf"]),
                content_types: list(&["application/pdf"]),
            },
        }
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(1024, 1024).is_ok());
        assert!(matches!(
            validate_file_size(1025, 1024),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_content_type_ignores_parameters() {
        let allowed = list(&["image/jpeg"]);
        assert!(validate_content_type("image/jpeg; charset=binary", &allowed).is_ok());
        assert!(validate_content_type("IMAGE/JPEG", &allowed).is_ok());
        assert!(validate_content_type("image/gif", &allowed).is_err());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let allowed = list(&["jpg"]);
        assert_eq!(validate_file_extension("Photo.JPG", &allowed).unwrap(), "jpg");
        assert!(validate_file_extension("photo", &allowed).is_err());
        assert!(validate_file_extension("photo.jpg.exe", &allowed).is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename(".."), "file");
    }

    #[test]
    fn test_limits_pick_rules_by_kind() {
        let limits = limits();
        let pdf = UploadIntent::new("a.pdf", "application/pdf", vec![0; 2048]);

        assert!(limits.check(AssetKind::Document, &pdf).is_ok());
        assert!(matches!(
            limits.check(AssetKind::Image, &pdf),
            Err(AppError::PayloadTooLarge(_))
        ));
        assert_eq!(limits.max_file_size(), 4096);
    }

    #[test]
    fn test_empty_file_rejected() {
        let empty = UploadIntent::new("a.png", "image/png", vec![]);
        assert!(limits().check(AssetKind::Image, &empty).is_err());
    }
}
