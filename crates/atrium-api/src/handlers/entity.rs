//! Generic list / get / create / update / delete handlers for media-backed entities.

use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::handlers::form::{read_entity_form, FormFields};
use crate::services::{MediaChanges, MediaEntity, MediaEntityService};
use crate::state::AppState;
use atrium_core::AppError;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// An entity kind exposed over HTTP.
pub trait EntityRoute: MediaEntity + Sized {
    fn service(state: &AppState) -> &MediaEntityService<Self>;

    fn parse_fields(form: &FormFields) -> Result<Self::Fields, AppError>;

    fn parse_patch(form: &FormFields) -> Result<Self::Patch, AppError>;
}

pub async fn list<E: EntityRoute>(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let views = E::service(&state).list().await?;
    Ok(Json(views))
}

pub async fn get_one<E: EntityRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let view = E::service(&state).get(id).await?;
    Ok(Json(view))
}

pub async fn create<E: EntityRoute>(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_entity_form::<E>(multipart, &state.limits).await?;
    if !form.clear.is_empty() {
        return Err(AppError::InvalidInput("Nothing to remove on create".to_string()).into());
    }
    let fields = E::parse_fields(&form.fields)?;

    let view = E::service(&state).create(fields, form.uploads).await?;

    tracing::info!(entity = E::KIND, user_id = user.user_id, "Entity created");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update<E: EntityRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_entity_form::<E>(multipart, &state.limits).await?;
    let patch = E::parse_patch(&form.fields)?;
    let changes = MediaChanges {
        uploads: form.uploads,
        clear: form.clear,
    };

    let view = E::service(&state).update(id, patch, changes).await?;

    tracing::info!(entity = E::KIND, record_id = id, user_id = user.user_id, "Entity updated");
    Ok(Json(view))
}

pub async fn delete<E: EntityRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    E::service(&state).delete(id).await?;

    tracing::info!(entity = E::KIND, record_id = id, user_id = user.user_id, "Entity deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Public read routes for `E` under `path`.
pub fn read_routes<E: EntityRoute>(path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(path, get(list::<E>))
        .route(&format!("{}/{{id}}", path), get(get_one::<E>))
}

/// Write routes for `E` under `path`; mount behind the auth middleware.
pub fn write_routes<E: EntityRoute>(path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(path, axum::routing::post(create::<E>))
        .route(
            &format!("{}/{{id}}", path),
            axum::routing::patch(update::<E>).delete(delete::<E>),
        )
}
