//! `AuthAccount` extractor: the account id stored by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use picshare_core::error::AppError;

use crate::error::ApiError;

/// The account a validated token was issued for.
///
/// Only available on routes behind [`require_auth`](crate::middleware::auth::require_auth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAccount {
    /// Subject of the validated token.
    pub account_id: u64,
}

impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAccount>()
            .copied()
            .ok_or_else(|| AppError::authentication("Unauthorized").into())
    }
}
