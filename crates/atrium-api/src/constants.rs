//! Application-wide constants

/// Prefix for every versioned route.
pub const API_PREFIX: &str = "/api/v1";

/// Slack added on top of the largest upload limit for multipart framing and text fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Most file parts a single entity form carries (site settings: logo, favicon, hero image).
pub const MAX_FILES_PER_REQUEST: usize = 3;

/// In-flight request cap when `HTTP_CONCURRENCY_LIMIT` is unset.
pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;
