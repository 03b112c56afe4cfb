use atrium_core::models::{
    MediaFolder, MediaSlot, Member, MemberPatch, MemberResponse, NewMember, StoredMedia,
};

use crate::services::media_entity::{MediaEntity, MediaUrls};

pub struct Members;

impl MediaEntity for Members {
    type Record = Member;
    type Fields = NewMember;
    type Patch = MemberPatch;
    type View = MemberResponse;

    const KIND: &'static str = "member";
    const SLOTS: &'static [MediaSlot] = &[MediaSlot::image("photo")];

    fn build(fields: NewMember) -> Member {
        Member::new(fields)
    }

    fn apply(record: &mut Member, patch: MemberPatch) {
        record.apply(patch);
    }

    fn folder(_record: &Member) -> MediaFolder {
        MediaFolder::Members
    }

    fn id(record: &Member) -> i64 {
        record.id
    }

    fn media_key<'a>(record: &'a Member, slot: &str) -> Option<&'a str> {
        match slot {
            "photo" => record.photo_key.as_deref(),
            _ => None,
        }
    }

    fn set_media(record: &mut Member, slot: &str, media: Option<StoredMedia>) {
        if slot == "photo" {
            record.photo_key = media.map(|m| m.key);
        }
    }

    fn view(record: &Member, urls: &MediaUrls) -> MemberResponse {
        MemberResponse {
            id: record.id,
            name: record.name.clone(),
            position: record.position.clone(),
            bio: record.bio.clone(),
            photo_url: urls.get("photo"),
            sort_order: record.sort_order,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
