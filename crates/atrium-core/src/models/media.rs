use std::fmt::{Display, Formatter, Result as FmtResult};

use super::document::DocumentType;

/// Namespace a blob lives in. Derived from the entity kind (and, for documents,
/// the document type); never chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFolder {
    Testimonials,
    Members,
    Documents(DocumentType),
    Settings,
    Ads,
}

impl MediaFolder {
    pub fn as_path(&self) -> String {
        match self {
            MediaFolder::Testimonials => "testimonials".to_string(),
            MediaFolder::Members => "members".to_string(),
            MediaFolder::Documents(kind) => format!("documents/{}", kind),
            MediaFolder::Settings => "settings".to_string(),
            MediaFolder::Ads => "ads".to_string(),
        }
    }
}

impl Display for MediaFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.as_path())
    }
}

/// What kind of file a media slot accepts; selects the upload limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Document,
}

/// A named media reference field on a record (e.g. `photo`, `logo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSlot {
    pub name: &'static str,
    pub kind: AssetKind,
    /// A required slot must be filled on create and can't be cleared.
    pub required: bool,
}

impl MediaSlot {
    pub const fn image(name: &'static str) -> Self {
        Self {
            name,
            kind: AssetKind::Image,
            required: false,
        }
    }

    pub const fn required_document(name: &'static str) -> Self {
        Self {
            name,
            kind: AssetKind::Document,
            required: true,
        }
    }
}

/// A blob that has been written to the blob store, as handed to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_paths() {
        assert_eq!(MediaFolder::Testimonials.as_path(), "testimonials");
        assert_eq!(MediaFolder::Members.to_string(), "members");
        assert_eq!(
            MediaFolder::Documents(DocumentType::Policy).as_path(),
            "documents/policy"
        );
        assert_eq!(MediaFolder::Settings.as_path(), "settings");
        assert_eq!(MediaFolder::Ads.as_path(), "ads");
    }
}
