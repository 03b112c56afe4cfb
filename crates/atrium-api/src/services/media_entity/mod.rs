//! Media-backed entity write protocol
//!
//! A media-backed entity is a relational record plus zero or more blobs it
//! references by key. The record store and the blob store never share a
//! transaction, so every operation is sequenced so that a persisted record
//! never points at a missing blob:
//!
//! - **create**: upload, then insert. A failed insert discards the new blobs.
//! - **update**: find, upload replacements, then write. A failed write discards
//!   the new blobs; a successful one discards the blobs it replaced.
//! - **delete**: find, delete the row, then discard its blobs. A failed row
//!   delete leaves the blobs alone.
//!
//! Discards are best-effort (see [`BlobCleanup`]) and never change the result.
//! Concurrent updates of the same record are not serialized: the last write wins.

mod error;

pub use error::MediaEntityError;

use atrium_core::models::{MediaFolder, MediaSlot, StoredMedia};
use atrium_db::RecordStore;
use atrium_storage::{BlobStore, UploadIntent};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;
use validator::Validate;

use super::cleanup::BlobCleanup;

/// Per-kind mapping plugged into [`MediaEntityService`].
///
/// Implementors describe their media slots, where their blobs live and how
/// fields map onto the record. They never touch either store.
pub trait MediaEntity: Send + Sync + 'static {
    type Record: Clone + Validate + Send + Sync + 'static;
    type Fields: Send;
    type Patch: Send;
    type View: Serialize + Send;

    /// Singular name used in logs and error messages.
    const KIND: &'static str;
    const SLOTS: &'static [MediaSlot];

    fn build(fields: Self::Fields) -> Self::Record;

    /// Apply supplied fields; unsupplied fields stay unchanged.
    fn apply(record: &mut Self::Record, patch: Self::Patch);

    fn folder(record: &Self::Record) -> MediaFolder;

    fn id(record: &Self::Record) -> i64;

    fn media_key<'a>(record: &'a Self::Record, slot: &str) -> Option<&'a str>;

    fn set_media(record: &mut Self::Record, slot: &str, media: Option<StoredMedia>);

    fn view(record: &Self::Record, urls: &MediaUrls) -> Self::View;

    fn slot(name: &str) -> Option<&'static MediaSlot> {
        Self::SLOTS.iter().find(|s| s.name == name)
    }
}

/// A file destined for one media slot.
#[derive(Debug, Clone)]
pub struct SlotUpload {
    pub slot: &'static str,
    pub upload: UploadIntent,
}

/// Media edits carried by an update: replacements and explicit removals.
#[derive(Debug, Clone, Default)]
pub struct MediaChanges {
    pub uploads: Vec<SlotUpload>,
    pub clear: Vec<&'static str>,
}

impl MediaChanges {
    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty() && self.clear.is_empty()
    }
}

/// Resolved public URLs by slot name, handed to [`MediaEntity::view`].
#[derive(Debug, Default)]
pub struct MediaUrls(HashMap<&'static str, String>);

impl MediaUrls {
    pub fn get(&self, slot: &str) -> Option<String> {
        self.0.get(slot).cloned()
    }
}

/// Create / update / delete for one entity kind.
pub struct MediaEntityService<E: MediaEntity> {
    records: Arc<dyn RecordStore<E::Record>>,
    blobs: Arc<dyn BlobStore>,
    cleanup: BlobCleanup,
    _entity: PhantomData<fn() -> E>,
}

impl<E: MediaEntity> Clone for MediaEntityService<E> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            blobs: self.blobs.clone(),
            cleanup: self.cleanup.clone(),
            _entity: PhantomData,
        }
    }
}

type Uploaded = Vec<(&'static str, StoredMedia)>;

impl<E: MediaEntity> MediaEntityService<E> {
    pub fn new(
        records: Arc<dyn RecordStore<E::Record>>,
        blobs: Arc<dyn BlobStore>,
        cleanup: BlobCleanup,
    ) -> Self {
        Self {
            records,
            blobs,
            cleanup,
            _entity: PhantomData,
        }
    }

    /// Resolve every slot's key to a URL. Absent keys produce no entry.
    pub fn media_urls(&self, record: &E::Record) -> MediaUrls {
        let folder = E::folder(record);
        let urls = E::SLOTS
            .iter()
            .filter_map(|slot| {
                self.blobs
                    .media_url(&folder, E::media_key(record, slot.name))
                    .map(|url| (slot.name, url))
            })
            .collect();
        MediaUrls(urls)
    }

    pub fn to_view(&self, record: &E::Record) -> E::View {
        E::view(record, &self.media_urls(record))
    }

    pub async fn get(&self, id: i64) -> Result<E::View, MediaEntityError> {
        let record = self.find(id).await?;
        Ok(self.to_view(&record))
    }

    pub async fn list(&self) -> Result<Vec<E::View>, MediaEntityError> {
        let records = self
            .records
            .list()
            .await
            .map_err(|source| MediaEntityError::Lookup {
                entity: E::KIND,
                source,
            })?;
        Ok(records.iter().map(|r| self.to_view(r)).collect())
    }

    #[tracing::instrument(skip(self, input, uploads), fields(entity = E::KIND, uploads = uploads.len()))]
    pub async fn create(
        &self,
        input: E::Fields,
        uploads: Vec<SlotUpload>,
    ) -> Result<E::View, MediaEntityError> {
        let mut record = E::build(input);
        self.validate(&record)?;
        self.check_slots(&uploads, &[])?;

        if let Some(missing) = E::SLOTS
            .iter()
            .find(|s| s.required && !uploads.iter().any(|u| u.slot == s.name))
        {
            return Err(self.invalid(format!("a {} file is required", missing.name)));
        }

        let folder = E::folder(&record);
        let uploaded = self.upload_all(&folder, uploads).await?;
        for (slot, media) in &uploaded {
            E::set_media(&mut record, slot, Some(media.clone()));
        }

        match self.records.create(record).await {
            Ok(saved) => {
                tracing::info!(
                    entity = E::KIND,
                    record_id = E::id(&saved),
                    folder = %folder,
                    "Created media-backed record"
                );
                Ok(self.to_view(&saved))
            }
            Err(source) => {
                tracing::error!(
                    error = %source,
                    entity = E::KIND,
                    folder = %folder,
                    "Failed to persist new record, discarding uploads"
                );
                self.discard_uploaded(&folder, &uploaded, "create persist failed")
                    .await;
                Err(MediaEntityError::PersistFailed {
                    entity: E::KIND,
                    source,
                })
            }
        }
    }

    #[tracing::instrument(skip(self, patch, changes), fields(entity = E::KIND, record_id = id))]
    pub async fn update(
        &self,
        id: i64,
        patch: E::Patch,
        changes: MediaChanges,
    ) -> Result<E::View, MediaEntityError> {
        let mut record = self.find(id).await?;
        let old_folder = E::folder(&record);
        let old_keys: HashMap<&'static str, String> = E::SLOTS
            .iter()
            .filter_map(|s| E::media_key(&record, s.name).map(|k| (s.name, k.to_string())))
            .collect();

        E::apply(&mut record, patch);
        self.validate(&record)?;
        self.check_slots(&changes.uploads, &changes.clear)?;

        let new_folder = E::folder(&record);
        if new_folder != old_folder {
            // Kept blobs would be left in the old folder.
            let stranded = old_keys.keys().find(|slot| {
                !changes.uploads.iter().any(|u| u.slot == **slot)
                    && !changes.clear.contains(slot)
            });
            if let Some(slot) = stranded {
                return Err(self.invalid(format!(
                    "changing the folder of a {} requires a new {} upload",
                    E::KIND,
                    slot
                )));
            }
        }

        let uploaded = self.upload_all(&new_folder, changes.uploads).await?;

        let mut superseded = Vec::new();
        for (slot, media) in &uploaded {
            if let Some(old) = old_keys.get(slot) {
                superseded.push(old.clone());
            }
            E::set_media(&mut record, slot, Some(media.clone()));
        }
        for slot in &changes.clear {
            if let Some(old) = old_keys.get(slot) {
                superseded.push(old.clone());
            }
            E::set_media(&mut record, slot, None);
        }

        if let Err(source) = self.records.update(&record).await {
            tracing::error!(
                error = %source,
                entity = E::KIND,
                record_id = id,
                "Failed to persist update, discarding new uploads"
            );
            self.discard_uploaded(&new_folder, &uploaded, "update persist failed")
                .await;
            return Err(MediaEntityError::PersistFailed {
                entity: E::KIND,
                source,
            });
        }

        tracing::info!(
            entity = E::KIND,
            record_id = id,
            replaced = superseded.len(),
            "Updated media-backed record"
        );

        for key in &superseded {
            self.cleanup
                .discard(&old_folder, key, "superseded by update")
                .await;
        }

        Ok(self.to_view(&record))
    }

    #[tracing::instrument(skip(self), fields(entity = E::KIND, record_id = id))]
    pub async fn delete(&self, id: i64) -> Result<(), MediaEntityError> {
        let record = self.find(id).await?;
        let folder = E::folder(&record);
        let keys: Vec<String> = E::SLOTS
            .iter()
            .filter_map(|s| E::media_key(&record, s.name).map(String::from))
            .collect();

        self.records
            .delete(id)
            .await
            .map_err(|source| MediaEntityError::PersistFailed {
                entity: E::KIND,
                source,
            })?;

        tracing::info!(
            entity = E::KIND,
            record_id = id,
            blobs = keys.len(),
            "Deleted media-backed record"
        );

        for key in &keys {
            self.cleanup.discard(&folder, key, "record deleted").await;
        }

        Ok(())
    }

    async fn find(&self, id: i64) -> Result<E::Record, MediaEntityError> {
        self.records
            .find(id)
            .await
            .map_err(|source| MediaEntityError::Lookup {
                entity: E::KIND,
                source,
            })?
            .ok_or(MediaEntityError::NotFound {
                entity: E::KIND,
                id,
            })
    }

    fn invalid(&self, message: String) -> MediaEntityError {
        MediaEntityError::Invalid {
            entity: E::KIND,
            message,
        }
    }

    fn validate(&self, record: &E::Record) -> Result<(), MediaEntityError> {
        record
            .validate()
            .map_err(|e| self.invalid(e.to_string()))
    }

    /// Each slot may appear once, either as an upload or a removal.
    fn check_slots(
        &self,
        uploads: &[SlotUpload],
        clear: &[&'static str],
    ) -> Result<(), MediaEntityError> {
        let mut seen = HashSet::new();
        for name in uploads.iter().map(|u| u.slot).chain(clear.iter().copied()) {
            let slot = E::slot(name)
                .ok_or_else(|| self.invalid(format!("unknown media field '{}'", name)))?;
            if !seen.insert(name) {
                return Err(self.invalid(format!("media field '{}' given more than once", name)));
            }
            if slot.required && clear.contains(&name) {
                return Err(self.invalid(format!("media field '{}' cannot be removed", name)));
            }
        }
        Ok(())
    }

    /// Upload every file or none: when one fails, the ones already stored are discarded.
    async fn upload_all(
        &self,
        folder: &MediaFolder,
        uploads: Vec<SlotUpload>,
    ) -> Result<Uploaded, MediaEntityError> {
        let mut uploaded = Vec::with_capacity(uploads.len());

        for SlotUpload { slot, upload } in uploads {
            let original_filename = upload.filename.clone();
            let content_type = upload.content_type.clone();
            let size = upload.size() as i64;

            match self.blobs.put(folder, upload).await {
                Ok(key) => {
                    tracing::debug!(
                        entity = E::KIND,
                        slot,
                        folder = %folder,
                        storage_key = %key,
                        "Uploaded blob"
                    );
                    uploaded.push((
                        slot,
                        StoredMedia {
                            key,
                            original_filename,
                            content_type,
                            size,
                        },
                    ));
                }
                Err(source) => {
                    tracing::warn!(
                        error = %source,
                        entity = E::KIND,
                        slot,
                        folder = %folder,
                        "Blob upload failed"
                    );
                    self.discard_uploaded(folder, &uploaded, "sibling upload failed")
                        .await;
                    return Err(MediaEntityError::UploadFailed {
                        entity: E::KIND,
                        slot,
                        source,
                    });
                }
            }
        }

        Ok(uploaded)
    }

    async fn discard_uploaded(&self, folder: &MediaFolder, uploaded: &Uploaded, reason: &'static str) {
        for (_, media) in uploaded {
            self.cleanup.discard(folder, &media.key, reason).await;
        }
    }
}
