use atrium_core::models::{
    MediaFolder, MediaSlot, NewTestimonial, StoredMedia, Testimonial, TestimonialPatch,
    TestimonialResponse,
};

use crate::services::media_entity::{MediaEntity, MediaUrls};

pub struct Testimonials;

impl MediaEntity for Testimonials {
    type Record = Testimonial;
    type Fields = NewTestimonial;
    type Patch = TestimonialPatch;
    type View = TestimonialResponse;

    const KIND: &'static str = "testimonial";
    const SLOTS: &'static [MediaSlot] = &[MediaSlot::image("photo")];

    fn build(fields: NewTestimonial) -> Testimonial {
        Testimonial::new(fields)
    }

    fn apply(record: &mut Testimonial, patch: TestimonialPatch) {
        record.apply(patch);
    }

    fn folder(_record: &Testimonial) -> MediaFolder {
        MediaFolder::Testimonials
    }

    fn id(record: &Testimonial) -> i64 {
        record.id
    }

    fn media_key<'a>(record: &'a Testimonial, slot: &str) -> Option<&'a str> {
        match slot {
            "photo" => record.photo_key.as_deref(),
            _ => None,
        }
    }

    fn set_media(record: &mut Testimonial, slot: &str, media: Option<StoredMedia>) {
        if slot == "photo" {
            record.photo_key = media.map(|m| m.key);
        }
    }

    fn view(record: &Testimonial, urls: &MediaUrls) -> TestimonialResponse {
        TestimonialResponse {
            id: record.id,
            name: record.name.clone(),
            role: record.role.clone(),
            content: record.content.clone(),
            rating: record.rating,
            photo_url: urls.get("photo"),
            is_published: record.is_published,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
