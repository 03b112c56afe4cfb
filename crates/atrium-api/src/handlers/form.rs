//! Multipart entity forms
//!
//! Text parts become [`FormFields`]; file parts must be named after one of the
//! entity's media slots and are validated against the upload limits before
//! the service sees them. A `remove_<slot>` text part set to a true value
//! clears that slot.

use crate::services::{MediaEntity, SlotUpload};
use crate::utils::upload::{sanitize_filename, UploadLimits};
use atrium_core::AppError;
use atrium_storage::UploadIntent;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::str::FromStr;

const REMOVE_PREFIX: &str = "remove_";

/// Text fields of a multipart form.
#[derive(Debug, Default, Clone)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Trimmed value as sent; `None` when the part is absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.0.get(name).map(|v| v.trim().to_string())
    }

    pub fn required(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::InvalidInput(format!("'{}' is required", name)))
    }

    /// For create forms: absent or empty means "no value".
    pub fn optional(&self, name: &str) -> Option<String> {
        self.text(name).filter(|v| !v.is_empty())
    }

    /// For patch forms: absent leaves the field alone, empty clears it.
    pub fn nullable(&self, name: &str) -> Option<Option<String>> {
        self.text(name).map(|v| (!v.is_empty()).then_some(v))
    }

    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|e| AppError::InvalidInput(format!("'{}' is invalid: {}", name, e))),
            None => Ok(None),
        }
    }

    /// Patch variant of [`FormFields::parsed`]: empty clears the field.
    pub fn nullable_parsed<T>(&self, name: &str) -> Result<Option<Option<T>>, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.text(name) {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(Some(None)),
            Some(_) => self.parsed(name).map(Some),
        }
    }

    pub fn flag(&self, name: &str) -> Result<Option<bool>, AppError> {
        match self.optional(name) {
            Some(v) => parse_bool(&v)
                .map(Some)
                .ok_or_else(|| AppError::InvalidInput(format!("'{}' must be true or false", name))),
            None => Ok(None),
        }
    }

    /// RFC 3339 timestamp.
    pub fn timestamp(&self, name: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        match self.optional(name) {
            Some(v) => parse_timestamp(name, &v).map(Some),
            None => Ok(None),
        }
    }

    pub fn nullable_timestamp(&self, name: &str) -> Result<Option<Option<DateTime<Utc>>>, AppError> {
        match self.text(name) {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(Some(None)),
            Some(v) => parse_timestamp(name, &v).map(|t| Some(Some(t))),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(name: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::InvalidInput(format!("'{}' must be an RFC 3339 timestamp: {}", name, e)))
}

/// A parsed multipart form for entity kind `E`.
#[derive(Debug, Default)]
pub struct EntityForm {
    pub fields: FormFields,
    pub uploads: Vec<SlotUpload>,
    pub clear: Vec<&'static str>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

fn media_slot<E: MediaEntity>(name: &str) -> Result<&'static atrium_core::models::MediaSlot, AppError> {
    E::slot(name).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown file field '{}' for {}; expected one of: {}",
            name,
            E::KIND,
            E::SLOTS
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Read every part of `multipart`, validating files against `limits`.
pub async fn read_entity_form<E: MediaEntity>(
    mut multipart: Multipart,
    limits: &UploadLimits,
) -> Result<EntityForm, AppError> {
    let mut form = EntityForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        match file_name {
            Some(file_name) => {
                let slot = media_slot::<E>(&name)?;
                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part for an untouched file input.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                if form.uploads.iter().any(|u| u.slot == slot.name) {
                    return Err(AppError::InvalidInput(format!(
                        "Only one file may be sent for '{}'",
                        slot.name
                    )));
                }

                let upload =
                    UploadIntent::new(sanitize_filename(&file_name), content_type, data.to_vec());
                limits.check(slot.kind, &upload)?;

                tracing::debug!(
                    entity = E::KIND,
                    slot = slot.name,
                    filename = %upload.filename,
                    size = upload.size(),
                    "Received file part"
                );
                form.uploads.push(SlotUpload {
                    slot: slot.name,
                    upload,
                });
            }
            None => {
                let value = field.text().await.map_err(multipart_error)?;
                if let Some(slot_name) = name.strip_prefix(REMOVE_PREFIX) {
                    let slot = media_slot::<E>(slot_name)?;
                    let remove = parse_bool(value.trim()).ok_or_else(|| {
                        AppError::InvalidInput(format!("'{}' must be true or false", name))
                    })?;
                    if remove && !form.clear.contains(&slot.name) {
                        form.clear.push(slot.name);
                    }
                } else {
                    form.fields.insert(name, value);
                }
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        let mut form = FormFields::default();
        for (k, v) in pairs {
            form.insert(*k, *v);
        }
        form
    }

    #[test]
    fn nullable_distinguishes_absent_from_empty() {
        let form = fields(&[("bio", ""), ("role", " Chair ")]);
        assert_eq!(form.nullable("bio"), Some(None));
        assert_eq!(form.nullable("role"), Some(Some("Chair".to_string())));
        assert_eq!(form.nullable("missing"), None);
    }

    #[test]
    fn required_rejects_blank() {
        let form = fields(&[("name", "  ")]);
        assert!(form.required("name").is_err());
        assert!(form.required("other").is_err());
    }

    #[test]
    fn parsed_numbers_and_flags() {
        let form = fields(&[("rating", "4"), ("is_published", "on"), ("bad", "x")]);
        assert_eq!(form.parsed::<i32>("rating").unwrap(), Some(4));
        assert_eq!(form.flag("is_published").unwrap(), Some(true));
        assert!(form.parsed::<i32>("bad").is_err());
        assert!(form.flag("bad").is_err());
        assert_eq!(form.flag("absent").unwrap(), None);
    }

    #[test]
    fn nullable_parsed_clears_on_empty() {
        let form = fields(&[("rating", "")]);
        assert_eq!(form.nullable_parsed::<i32>("rating").unwrap(), Some(None));
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let form = fields(&[("starts_at", "2026-03-01T09:00:00Z"), ("ends_at", "tomorrow")]);
        assert!(form.timestamp("starts_at").unwrap().is_some());
        assert!(form.timestamp("ends_at").is_err());
        assert_eq!(form.nullable_timestamp("missing").unwrap(), None);
    }
}
