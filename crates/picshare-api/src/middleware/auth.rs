//! Bearer token middleware for protected routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use picshare_core::error::AppError;

use crate::error::ApiResult;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// Rejects requests without a valid `Authorization` header.
///
/// The header may carry the raw token or `Bearer <token>`. On success the
/// account id is stored in the request extensions as [`AuthAccount`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::authentication("Unauthorized").into()),
    };

    let raw = header
        .to_str()
        .map_err(|_| AppError::authentication("Invalid token"))?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    let account_id = state.jwt_decoder.validate(token).map_err(|e| {
        debug!(reason = %e.message, "Rejected bearer token");
        AppError::authentication("Invalid token")
    })?;

    request.extensions_mut().insert(AuthAccount { account_id });
    Ok(next.run(request).await)
}
