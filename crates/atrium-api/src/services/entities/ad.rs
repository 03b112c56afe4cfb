use atrium_core::models::{Ad, AdPatch, AdResponse, MediaFolder, MediaSlot, NewAd, StoredMedia};
use chrono::Utc;

use crate::services::media_entity::{MediaEntity, MediaUrls};

pub struct Ads;

impl MediaEntity for Ads {
    type Record = Ad;
    type Fields = NewAd;
    type Patch = AdPatch;
    type View = AdResponse;

    const KIND: &'static str = "ad";
    const SLOTS: &'static [MediaSlot] = &[MediaSlot::image("image")];

    fn build(fields: NewAd) -> Ad {
        Ad::new(fields)
    }

    fn apply(record: &mut Ad, patch: AdPatch) {
        record.apply(patch);
    }

    fn folder(_record: &Ad) -> MediaFolder {
        MediaFolder::Ads
    }

    fn id(record: &Ad) -> i64 {
        record.id
    }

    fn media_key<'a>(record: &'a Ad, slot: &str) -> Option<&'a str> {
        match slot {
            "image" => record.image_key.as_deref(),
            _ => None,
        }
    }

    fn set_media(record: &mut Ad, slot: &str, media: Option<StoredMedia>) {
        if slot == "image" {
            record.image_key = media.map(|m| m.key);
        }
    }

    fn view(record: &Ad, urls: &MediaUrls) -> AdResponse {
        AdResponse {
            id: record.id,
            title: record.title.clone(),
            link_url: record.link_url.clone(),
            placement: record.placement.clone(),
            image_url: urls.get("image"),
            is_active: record.is_active,
            is_running: record.is_running(Utc::now()),
            starts_at: record.starts_at,
            ends_at: record.ends_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
