pub mod ad;
pub mod document;
pub mod member;
pub mod site_setting;
pub mod testimonial;

pub use ad::AdRepository;
pub use document::DocumentRepository;
pub use member::MemberRepository;
pub use site_setting::SiteSettingRepository;
pub use testimonial::TestimonialRepository;
