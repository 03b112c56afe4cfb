//! Entity strategies for the media-backed entity protocol.
//!
//! Each kind only states its slots, its folder and how fields map onto the
//! record; sequencing and compensation live in `media_entity`.

mod ad;
mod document;
mod member;
mod site_setting;
mod testimonial;

pub use ad::Ads;
pub use document::Documents;
pub use member::Members;
pub use site_setting::SiteSettings;
pub use testimonial::Testimonials;
