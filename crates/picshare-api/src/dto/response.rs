//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for protected routes.
    pub token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `"connected"`, `"unavailable"`, or `"memory"`.
    pub database: String,
    /// Blob store provider name, or `"unavailable"`.
    pub storage: String,
}
