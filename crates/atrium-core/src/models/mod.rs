//! Data models for the application
//!
//! Each sub-module holds one entity kind: the persisted record, the fields
//! accepted on create, the sparse patch accepted on update and the outward
//! response that carries resolved URLs instead of storage keys.

mod ad;
mod document;
mod media;
mod member;
mod site_setting;
mod testimonial;
mod user;

pub use ad::*;
pub use document::*;
pub use media::*;
pub use member::*;
pub use site_setting::*;
pub use testimonial::*;
pub use user::*;
