use crate::auth::jwt::AuthContext;
use crate::error::HttpAppError;
use atrium_core::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Require a valid `Authorization: Bearer <jwt>` and attach the [`AuthUser`].
///
/// [`AuthUser`]: crate::auth::AuthUser
pub async fn auth_middleware(
    State(auth): State<Arc<AuthContext>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            tracing::debug!("Rejected request without authorization header");
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    match auth.verify(token).await {
        Ok(user) => {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}
