//! Auth handlers: register and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::TokenResponse;
use crate::error::ApiResult;
use crate::extractors::Credentials;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Credentials(req): Credentials,
) -> ApiResult<(StatusCode, &'static str)> {
    state
        .account_service
        .register(&req.username, &req.password)
        .await?;

    Ok((StatusCode::CREATED, "User registered successfully"))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Credentials(req): Credentials,
) -> ApiResult<Json<TokenResponse>> {
    let token = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
