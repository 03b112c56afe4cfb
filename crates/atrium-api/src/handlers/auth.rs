//! Login and logout for back-office users.

use crate::auth::models::{LoginRequest, LoginResponse};
use crate::auth::password::verify_password;
use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use atrium_core::models::UserResponse;
use atrium_core::AppError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state
        .users
        .find_by_email(request.email.trim())
        .await?
        .filter(|u| u.is_active);

    let Some(user) = user else {
        tracing::debug!("Login rejected: unknown or inactive account");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
    };

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
    }

    let token = state.auth.issue(&user)?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expiry_seconds(),
        user: UserResponse::from(&user),
    }))
}

pub async fn logout(State(state): State<Arc<AppState>>, user: AuthUser) -> impl IntoResponse {
    state.auth.revoke(&user).await;
    StatusCode::NO_CONTENT
}
