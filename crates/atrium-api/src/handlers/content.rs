//! Form mapping for each content kind.

use crate::handlers::entity::EntityRoute;
use crate::handlers::form::FormFields;
use crate::services::{Ads, Documents, MediaEntityService, Members, SiteSettings, Testimonials};
use crate::state::AppState;
use atrium_core::models::{
    AdPatch, DocumentPatch, MemberPatch, NewAd, NewDocument, NewMember, NewSiteSetting,
    NewTestimonial, SiteSettingPatch, TestimonialPatch,
};
use atrium_core::AppError;

impl EntityRoute for Testimonials {
    fn service(state: &AppState) -> &MediaEntityService<Self> {
        &state.testimonials
    }

    fn parse_fields(form: &FormFields) -> Result<NewTestimonial, AppError> {
        Ok(NewTestimonial {
            name: form.required("name")?,
            role: form.optional("role"),
            content: form.required("content")?,
            rating: form.parsed("rating")?,
            is_published: form.flag("is_published")?.unwrap_or(false),
        })
    }

    fn parse_patch(form: &FormFields) -> Result<TestimonialPatch, AppError> {
        Ok(TestimonialPatch {
            name: form.text("name"),
            role: form.nullable("role"),
            content: form.text("content"),
            rating: form.nullable_parsed("rating")?,
            is_published: form.flag("is_published")?,
        })
    }
}

impl EntityRoute for Members {
    fn service(state: &AppState) -> &MediaEntityService<Self> {
        &state.members
    }

    fn parse_fields(form: &FormFields) -> Result<NewMember, AppError> {
        Ok(NewMember {
            name: form.required("name")?,
            position: form.required("position")?,
            bio: form.optional("bio"),
            sort_order: form.parsed("sort_order")?.unwrap_or(0),
            is_active: form.flag("is_active")?.unwrap_or(true),
        })
    }

    fn parse_patch(form: &FormFields) -> Result<MemberPatch, AppError> {
        Ok(MemberPatch {
            name: form.text("name"),
            position: form.text("position"),
            bio: form.nullable("bio"),
            sort_order: form.parsed("sort_order")?,
            is_active: form.flag("is_active")?,
        })
    }
}

impl EntityRoute for Documents {
    fn service(state: &AppState) -> &MediaEntityService<Self> {
        &state.documents
    }

    fn parse_fields(form: &FormFields) -> Result<NewDocument, AppError> {
        let document_type = form
            .parsed("document_type")?
            .ok_or_else(|| AppError::InvalidInput("'document_type' is required".to_string()))?;
        Ok(NewDocument {
            title: form.required("title")?,
            description: form.optional("description"),
            document_type,
            is_public: form.flag("is_public")?.unwrap_or(true),
        })
    }

    fn parse_patch(form: &FormFields) -> Result<DocumentPatch, AppError> {
        Ok(DocumentPatch {
            title: form.text("title"),
            description: form.nullable("description"),
            document_type: form.parsed("document_type")?,
            is_public: form.flag("is_public")?,
        })
    }
}

impl EntityRoute for Ads {
    fn service(state: &AppState) -> &MediaEntityService<Self> {
        &state.ads
    }

    fn parse_fields(form: &FormFields) -> Result<NewAd, AppError> {
        Ok(NewAd {
            title: form.required("title")?,
            link_url: form.optional("link_url"),
            placement: form.required("placement")?,
            is_active: form.flag("is_active")?.unwrap_or(true),
            starts_at: form.timestamp("starts_at")?,
            ends_at: form.timestamp("ends_at")?,
        })
    }

    fn parse_patch(form: &FormFields) -> Result<AdPatch, AppError> {
        Ok(AdPatch {
            title: form.text("title"),
            link_url: form.nullable("link_url"),
            placement: form.text("placement"),
            is_active: form.flag("is_active")?,
            starts_at: form.nullable_timestamp("starts_at")?,
            ends_at: form.nullable_timestamp("ends_at")?,
        })
    }
}

impl EntityRoute for SiteSettings {
    fn service(state: &AppState) -> &MediaEntityService<Self> {
        &state.site_settings
    }

    fn parse_fields(form: &FormFields) -> Result<NewSiteSetting, AppError> {
        Ok(NewSiteSetting {
            site_name: form.required("site_name")?,
            tagline: form.optional("tagline"),
            contact_email: form.optional("contact_email"),
            contact_phone: form.optional("contact_phone"),
            address: form.optional("address"),
        })
    }

    fn parse_patch(form: &FormFields) -> Result<SiteSettingPatch, AppError> {
        Ok(SiteSettingPatch {
            site_name: form.text("site_name"),
            tagline: form.nullable("tagline"),
            contact_email: form.nullable("contact_email"),
            contact_phone: form.nullable("contact_phone"),
            address: form.nullable("address"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::models::DocumentType;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        let mut form = FormFields::default();
        for (k, v) in pairs {
            form.insert(*k, *v);
        }
        form
    }

    #[test]
    fn testimonial_fields_use_defaults() {
        let fields =
            Testimonials::parse_fields(&form(&[("name", "Ada"), ("content", "Lovely")])).unwrap();
        assert_eq!(fields.name, "Ada");
        assert!(fields.role.is_none());
        assert!(!fields.is_published);
    }

    #[test]
    fn document_requires_type() {
        assert!(Documents::parse_fields(&form(&[("title", "Plan")])).is_err());

        let fields =
            Documents::parse_fields(&form(&[("title", "Plan"), ("document_type", "policy")]))
                .unwrap();
        assert_eq!(fields.document_type, DocumentType::Policy);
    }

    #[test]
    fn member_patch_only_sets_sent_fields() {
        let patch = Members::parse_patch(&form(&[("position", "Chair"), ("bio", "")])).unwrap();
        assert_eq!(patch.position.as_deref(), Some("Chair"));
        assert_eq!(patch.bio, Some(None));
        assert!(patch.name.is_none());
        assert!(patch.sort_order.is_none());
    }

    #[test]
    fn ad_patch_clears_window() {
        let patch = Ads::parse_patch(&form(&[("ends_at", "")])).unwrap();
        assert_eq!(patch.ends_at, Some(None));
        assert!(patch.starts_at.is_none());
    }
}
