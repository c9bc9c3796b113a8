//! JWT token creation.

use chrono::Duration;
use jsonwebtoken::{EncodingKey, Header, encode};

use picshare_core::config::AuthConfig;
use picshare_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Upper bound on the configured lifetime, keeping `exp` well inside `i64`.
const MAX_TTL_HOURS: u64 = 24 * 365 * 100;

/// Signs bearer tokens with the shared HMAC secret (HS256).
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(config.token_ttl_hours.min(MAX_TTL_HOURS) as i64),
        }
    }

    /// Issues a token for `account_id` that expires after the configured TTL.
    pub fn issue(&self, account_id: u64) -> Result<String, AppError> {
        self.encode_claims(&Claims::for_account(account_id, self.ttl))
    }

    /// Signs arbitrary claims with HS256.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Failed to encode token: {e}"), e)
        })
    }
}
