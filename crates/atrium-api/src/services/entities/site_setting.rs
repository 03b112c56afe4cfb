use atrium_core::models::{
    MediaFolder, MediaSlot, NewSiteSetting, SiteSetting, SiteSettingPatch, SiteSettingResponse,
    StoredMedia,
};

use crate::services::media_entity::{MediaEntity, MediaUrls};

/// Site-wide settings with three independent image slots.
pub struct SiteSettings;

impl MediaEntity for SiteSettings {
    type Record = SiteSetting;
    type Fields = NewSiteSetting;
    type Patch = SiteSettingPatch;
    type View = SiteSettingResponse;

    const KIND: &'static str = "site settings";
    const SLOTS: &'static [MediaSlot] = &[
        MediaSlot::image("logo"),
        MediaSlot::image("favicon"),
        MediaSlot::image("hero_image"),
    ];

    fn build(fields: NewSiteSetting) -> SiteSetting {
        SiteSetting::new(fields)
    }

    fn apply(record: &mut SiteSetting, patch: SiteSettingPatch) {
        record.apply(patch);
    }

    fn folder(_record: &SiteSetting) -> MediaFolder {
        MediaFolder::Settings
    }

    fn id(record: &SiteSetting) -> i64 {
        record.id
    }

    fn media_key<'a>(record: &'a SiteSetting, slot: &str) -> Option<&'a str> {
        match slot {
            "logo" => record.logo_key.as_deref(),
            "favicon" => record.favicon_key.as_deref(),
            "hero_image" => record.hero_image_key.as_deref(),
            _ => None,
        }
    }

    fn set_media(record: &mut SiteSetting, slot: &str, media: Option<StoredMedia>) {
        let key = media.map(|m| m.key);
        match slot {
            "logo" => record.logo_key = key,
            "favicon" => record.favicon_key = key,
            "hero_image" => record.hero_image_key = key,
            _ => {}
        }
    }

    fn view(record: &SiteSetting, urls: &MediaUrls) -> SiteSettingResponse {
        SiteSettingResponse {
            site_name: record.site_name.clone(),
            tagline: record.tagline.clone(),
            contact_email: record.contact_email.clone(),
            contact_phone: record.contact_phone.clone(),
            address: record.address.clone(),
            logo_url: urls.get("logo"),
            favicon_url: urls.get("favicon"),
            hero_image_url: urls.get("hero_image"),
            updated_at: record.updated_at,
        }
    }
}
