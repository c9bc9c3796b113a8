//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Register and login body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    /// Username.
    pub username: String,
    /// Password, plaintext.
    pub password: String,
}
