use atrium_core::AppError;
use atrium_storage::StorageError;

/// Outcome taxonomy of the media-backed entity protocol.
///
/// `UploadFailed` and `Invalid` happen before anything is written.
/// `PersistFailed` means the record write failed and any blobs uploaded by the
/// same request have been handed to cleanup. Cleanup failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum MediaEntityError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("uploading {entity} {slot} failed: {source}")]
    UploadFailed {
        entity: &'static str,
        slot: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("persisting {entity} failed: {source}")]
    PersistFailed {
        entity: &'static str,
        #[source]
        source: AppError,
    },

    #[error("invalid {entity}: {message}")]
    Invalid {
        entity: &'static str,
        message: String,
    },

    /// The record store could not be read; nothing was attempted.
    #[error("looking up {entity} failed: {source}")]
    Lookup {
        entity: &'static str,
        #[source]
        source: AppError,
    },
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<MediaEntityError> for AppError {
    fn from(err: MediaEntityError) -> Self {
        match err {
            MediaEntityError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} {} not found", capitalize(entity), id))
            }
            MediaEntityError::UploadFailed {
                entity,
                slot,
                source,
            } => AppError::UploadFailed(format!("{} {}: {}", entity, slot, source)),
            MediaEntityError::PersistFailed { entity, source } => {
                AppError::PersistFailed(format!("{}: {}", entity, source))
            }
            MediaEntityError::Invalid { message, .. } => AppError::InvalidInput(message),
            MediaEntityError::Lookup { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::ErrorMetadata;

    #[test]
    fn not_found_names_the_entity() {
        let app: AppError = MediaEntityError::NotFound {
            entity: "member",
            id: 7,
        }
        .into();
        assert_eq!(app.http_status_code(), 404);
        assert_eq!(app.client_message(), "Member 7 not found");
    }

    #[test]
    fn lookup_passes_the_store_error_through() {
        let app: AppError = MediaEntityError::Lookup {
            entity: "ad",
            source: AppError::Internal("boom".to_string()),
        }
        .into();
        assert_eq!(app.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn persist_and_upload_failures_keep_their_codes() {
        let persist: AppError = MediaEntityError::PersistFailed {
            entity: "document",
            source: AppError::Internal("write failed".to_string()),
        }
        .into();
        assert_eq!(persist.error_code(), "PERSIST_FAILED");

        let upload: AppError = MediaEntityError::UploadFailed {
            entity: "document",
            slot: "file",
            source: StorageError::UploadFailed("timeout".to_string()),
        }
        .into();
        assert_eq!(upload.error_code(), "UPLOAD_FAILED");
    }
}
