//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use picshare_core::config::AuthConfig;
use picshare_core::error::AppError;

use super::claims::Claims;

/// Verifies bearer tokens against the shared HMAC secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Any HMAC algorithm is accepted; asymmetric and `none` tokens are not.
    /// `exp` is enforced when present but not required.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validates a token string and returns the account id it was issued for.
    pub fn validate(&self, token: &str) -> Result<u64, AppError> {
        self.decode_claims(token).map(|claims| claims.account_id())
    }

    /// Validates a token string and returns its claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => AppError::authentication("Token has expired"),
                    JwtErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    JwtErrorKind::InvalidAlgorithm => {
                        AppError::authentication("Unexpected signing method")
                    }
                    JwtErrorKind::InvalidToken => AppError::authentication("Invalid token format"),
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
