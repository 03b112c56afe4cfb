//! Site settings: a single row, read publicly and patched by editors.

use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::handlers::entity::EntityRoute;
use crate::handlers::form::read_entity_form;
use crate::services::{MediaChanges, SiteSettings};
use crate::state::AppState;
use atrium_core::models::SITE_SETTINGS_ID;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let view = state.site_settings.get(SITE_SETTINGS_ID).await?;
    Ok(Json(view))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_entity_form::<SiteSettings>(multipart, &state.limits).await?;
    let patch = SiteSettings::parse_patch(&form.fields)?;
    let changes = MediaChanges {
        uploads: form.uploads,
        clear: form.clear,
    };

    let view = state
        .site_settings
        .update(SITE_SETTINGS_ID, patch, changes)
        .await?;

    tracing::info!(user_id = user.user_id, "Site settings updated");
    Ok(Json(view))
}
