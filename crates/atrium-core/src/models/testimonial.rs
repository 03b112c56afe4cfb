use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Validate)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Testimonial {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 200))]
    pub role: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub photo_key: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scalar fields accepted when creating a testimonial.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTestimonial {
    pub name: String,
    pub role: Option<String>,
    pub content: String,
    pub rating: Option<i32>,
    pub is_published: bool,
}

/// Sparse update; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub role: Option<Option<String>>,
    pub content: Option<String>,
    pub rating: Option<Option<i32>>,
    pub is_published: Option<bool>,
}

impl Testimonial {
    pub fn new(fields: NewTestimonial) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: fields.name,
            role: fields.role,
            content: fields.content,
            rating: fields.rating,
            photo_key: None,
            is_published: fields.is_published,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: TestimonialPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialResponse {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub content: String,
    pub rating: Option<i32>,
    pub photo_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Testimonial {
        Testimonial::new(NewTestimonial {
            name: "Ada".to_string(),
            role: Some("Volunteer".to_string()),
            content: "Great place to work".to_string(),
            rating: Some(5),
            is_published: true,
        })
    }

    #[test]
    fn apply_leaves_unsupplied_fields_alone() {
        let mut testimonial = sample();
        testimonial.apply(TestimonialPatch {
            content: Some("Even better now".to_string()),
            ..Default::default()
        });
        assert_eq!(testimonial.content, "Even better now");
        assert_eq!(testimonial.name, "Ada");
        assert_eq!(testimonial.role.as_deref(), Some("Volunteer"));
        assert_eq!(testimonial.rating, Some(5));
    }

    #[test]
    fn apply_can_clear_nullable_fields() {
        let mut testimonial = sample();
        testimonial.apply(TestimonialPatch {
            role: Some(None),
            rating: Some(None),
            ..Default::default()
        });
        assert!(testimonial.role.is_none());
        assert!(testimonial.rating.is_none());
    }

    #[test]
    fn rating_out_of_range_is_invalid() {
        let mut testimonial = sample();
        testimonial.rating = Some(6);
        assert!(testimonial.validate().is_err());
        testimonial.rating = Some(0);
        assert!(testimonial.validate().is_err());
        testimonial.rating = None;
        assert!(testimonial.validate().is_ok());
    }

    #[test]
    fn empty_name_is_invalid() {
        let mut testimonial = sample();
        testimonial.name = String::new();
        assert!(testimonial.validate().is_err());
    }
}
