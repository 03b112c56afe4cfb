use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The single row of site-wide settings.
pub const SITE_SETTINGS_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Validate)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SiteSetting {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub site_name: String,
    #[validate(length(max = 300))]
    pub tagline: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 50))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub logo_key: Option<String>,
    pub favicon_key: Option<String>,
    pub hero_image_key: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSiteSetting {
    pub site_name: String,
    pub tagline: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SiteSettingPatch {
    pub site_name: Option<String>,
    pub tagline: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub contact_phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl SiteSetting {
    pub fn new(fields: NewSiteSetting) -> Self {
        Self {
            id: SITE_SETTINGS_ID,
            site_name: fields.site_name,
            tagline: fields.tagline,
            contact_email: fields.contact_email,
            contact_phone: fields.contact_phone,
            address: fields.address,
            logo_key: None,
            favicon_key: None,
            hero_image_key: None,
            updated_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, patch: SiteSettingPatch) {
        if let Some(site_name) = patch.site_name {
            self.site_name = site_name;
        }
        if let Some(tagline) = patch.tagline {
            self.tagline = tagline;
        }
        if let Some(contact_email) = patch.contact_email {
            self.contact_email = contact_email;
        }
        if let Some(contact_phone) = patch.contact_phone {
            self.contact_phone = contact_phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettingResponse {
    pub site_name: String,
    pub tagline: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub hero_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
