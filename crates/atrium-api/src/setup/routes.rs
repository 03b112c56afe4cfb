//! Route configuration and setup

use crate::auth::auth_middleware;
use crate::constants::{
    API_PREFIX, DEFAULT_HTTP_CONCURRENCY_LIMIT, MAX_FILES_PER_REQUEST, MULTIPART_OVERHEAD_BYTES,
};
use crate::handlers::{self, entity};
use crate::services::{Ads, Documents, Members, Testimonials};
use crate::state::AppState;
use atrium_core::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Write routes carry the auth middleware; reads are public.
    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        state.auth.clone(),
        auth_middleware,
    ));
    let api = public_routes().merge(protected_routes);

    let body_limit = state.limits.max_file_size() * MAX_FILES_PER_REQUEST + MULTIPART_OVERHEAD_BYTES;
    tracing::info!(body_limit, "Request body limit configured");

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(http_concurrency_limit, "HTTP concurrency limit layer enabled");

    let app = Router::new()
        .nest(API_PREFIX, api)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };
    Ok(cors)
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/auth/login", post(handlers::auth::login))
        .route("/settings", get(handlers::settings::get_settings))
        .merge(entity::read_routes::<Testimonials>("/testimonials"))
        .merge(entity::read_routes::<Members>("/members"))
        .merge(entity::read_routes::<Documents>("/documents"))
        .merge(entity::read_routes::<Ads>("/ads"))
}

/// Protected routes (require a bearer token)
fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/settings",
            axum::routing::patch(handlers::settings::update_settings),
        )
        .merge(entity::write_routes::<Testimonials>("/testimonials"))
        .merge(entity::write_routes::<Members>("/members"))
        .merge(entity::write_routes::<Documents>("/documents"))
        .merge(entity::write_routes::<Ads>("/ads"))
}
