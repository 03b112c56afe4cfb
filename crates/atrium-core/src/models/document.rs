use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category of a published document. Part of the blob folder path, so a
/// stored file belongs to exactly one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "document_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Report,
    Policy,
    Form,
    Other,
}

impl FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(DocumentType::Report),
            "policy" => Ok(DocumentType::Policy),
            "form" => Ok(DocumentType::Form),
            "other" => Ok(DocumentType::Other),
            _ => Err(anyhow::anyhow!("Invalid document type: {}", s)),
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentType::Report => write!(f, "report"),
            DocumentType::Policy => write!(f, "policy"),
            DocumentType::Form => write!(f, "form"),
            DocumentType::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub id: i64,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub document_type: DocumentType,
    pub file_key: Option<String>,
    pub original_filename: Option<String>,
    pub content_type: Option<String>,
    pub file_size: Option<i64>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub document_type: DocumentType,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub document_type: Option<DocumentType>,
    pub is_public: Option<bool>,
}

impl Document {
    pub fn new(fields: NewDocument) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: fields.title,
            description: fields.description,
            document_type: fields.document_type,
            file_key: None,
            original_filename: None,
            content_type: None,
            file_size: None,
            is_public: fields.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(document_type) = patch.document_type {
            self.document_type = document_type;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub document_type: DocumentType,
    pub file_url: Option<String>,
    pub original_filename: Option<String>,
    pub content_type: Option<String>,
    pub file_size: Option<i64>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_round_trips_through_text() {
        for kind in [
            DocumentType::Report,
            DocumentType::Policy,
            DocumentType::Form,
            DocumentType::Other,
        ] {
            assert_eq!(kind.to_string().parse::<DocumentType>().unwrap(), kind);
        }
        assert!("memo".parse::<DocumentType>().is_err());
    }

    #[test]
    fn document_type_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentType::Policy).unwrap();
        assert_eq!(json, "\"policy\"");
    }
}
