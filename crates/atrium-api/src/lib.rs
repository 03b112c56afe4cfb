//! Atrium API Library
//!
//! This crate provides the media-backed entity services, the HTTP handlers and
//! middleware, and application setup.

pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;
pub mod test_helpers;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{BlobCleanup, MediaEntity, MediaEntityError, MediaEntityService};
pub use state::AppState;
