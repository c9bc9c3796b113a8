//! Content type detection from file extensions.

/// Fallback type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type to send for `name`, falling back to `application/octet-stream`.
pub fn content_type_for(name: &str) -> &'static str {
    mime_guess::from_path(name).first_raw().unwrap_or(OCTET_STREAM)
}
