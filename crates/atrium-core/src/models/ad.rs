use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Advertisement banner placed somewhere on the site for an optional window.
#[derive(Debug, Clone, PartialEq, Validate)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[validate(schema(function = "validate_ad_window"))]
pub struct Ad {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub link_url: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub placement: String,
    pub image_key: Option<String>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_ad_window(ad: &Ad) -> Result<(), ValidationError> {
    if let (Some(starts_at), Some(ends_at)) = (ad.starts_at, ad.ends_at) {
        if ends_at < starts_at {
            let mut err = ValidationError::new("ad_window");
            err.message = Some("ends_at must not be before starts_at".into());
            return Err(err);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAd {
    pub title: String,
    pub link_url: Option<String>,
    pub placement: String,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct AdPatch {
    pub title: Option<String>,
    pub link_url: Option<Option<String>>,
    pub placement: Option<String>,
    pub is_active: Option<bool>,
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

impl Ad {
    pub fn new(fields: NewAd) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: fields.title,
            link_url: fields.link_url,
            placement: fields.placement,
            image_key: None,
            is_active: fields.is_active,
            starts_at: fields.starts_at,
            ends_at: fields.ends_at,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: AdPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(link_url) = patch.link_url {
            self.link_url = link_url;
        }
        if let Some(placement) = patch.placement {
            self.placement = placement;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(starts_at) = patch.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = patch.ends_at {
            self.ends_at = ends_at;
        }
        self.updated_at = Utc::now();
    }

    /// Whether the ad should be shown at `now`.
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.map_or(true, |s| s <= now)
            && self.ends_at.map_or(true, |e| now <= e)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub link_url: Option<String>,
    pub placement: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_running: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Ad {
        Ad::new(NewAd {
            title: "Spring fair".to_string(),
            link_url: Some("https://example.org/fair".to_string()),
            placement: "sidebar".to_string(),
            is_active: true,
            ..Default::default()
        })
    }

    #[test]
    fn window_must_not_end_before_it_starts() {
        let now = Utc::now();
        let mut ad = sample();
        ad.starts_at = Some(now);
        ad.ends_at = Some(now - Duration::days(1));
        assert!(ad.validate().is_err());

        ad.ends_at = Some(now + Duration::days(1));
        assert!(ad.validate().is_ok());
    }

    #[test]
    fn link_url_must_be_a_url() {
        let mut ad = sample();
        ad.link_url = Some("not a url".to_string());
        assert!(ad.validate().is_err());
    }

    #[test]
    fn is_running_respects_window_and_flag() {
        let now = Utc::now();
        let mut ad = sample();
        assert!(ad.is_running(now));

        ad.starts_at = Some(now + Duration::hours(1));
        assert!(!ad.is_running(now));

        ad.starts_at = None;
        ad.is_active = false;
        assert!(!ad.is_running(now));
    }
}
