use atrium_core::models::{
    Document, DocumentPatch, DocumentResponse, MediaFolder, MediaSlot, NewDocument, StoredMedia,
};

use crate::services::media_entity::{MediaEntity, MediaUrls};

/// Documents keep their file under `documents/<type>`, so the folder moves
/// with the document type.
pub struct Documents;

impl MediaEntity for Documents {
    type Record = Document;
    type Fields = NewDocument;
    type Patch = DocumentPatch;
    type View = DocumentResponse;

    const KIND: &'static str = "document";
    const SLOTS: &'static [MediaSlot] = &[MediaSlot::required_document("file")];

    fn build(fields: NewDocument) -> Document {
        Document::new(fields)
    }

    fn apply(record: &mut Document, patch: DocumentPatch) {
        record.apply(patch);
    }

    fn folder(record: &Document) -> MediaFolder {
        MediaFolder::Documents(record.document_type)
    }

    fn id(record: &Document) -> i64 {
        record.id
    }

    fn media_key<'a>(record: &'a Document, slot: &str) -> Option<&'a str> {
        match slot {
            "file" => record.file_key.as_deref(),
            _ => None,
        }
    }

    fn set_media(record: &mut Document, slot: &str, media: Option<StoredMedia>) {
        if slot != "file" {
            return;
        }
        match media {
            Some(m) => {
                record.file_key = Some(m.key);
                record.original_filename = Some(m.original_filename);
                record.content_type = Some(m.content_type);
                record.file_size = Some(m.size);
            }
            None => {
                record.file_key = None;
                record.original_filename = None;
                record.content_type = None;
                record.file_size = None;
            }
        }
    }

    fn view(record: &Document, urls: &MediaUrls) -> DocumentResponse {
        DocumentResponse {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            document_type: record.document_type,
            file_url: urls.get("file"),
            original_filename: record.original_filename.clone(),
            content_type: record.content_type.clone(),
            file_size: record.file_size,
            is_public: record.is_public,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
