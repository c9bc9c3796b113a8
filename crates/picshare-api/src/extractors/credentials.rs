//! `Credentials` extractor: username and password from a JSON, form, or
//! multipart body.

use axum::Form;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use tracing::debug;

use picshare_core::error::AppError;

use crate::dto::request::CredentialsRequest;
use crate::error::ApiError;

/// Parsed register/login body.
///
/// `application/x-www-form-urlencoded` and `multipart/form-data` bodies are
/// read as forms; anything else is parsed as JSON. Absent fields become
/// empty strings.
#[derive(Debug, Clone)]
pub struct Credentials(pub CredentialsRequest);

fn invalid_input() -> AppError {
    AppError::validation("Invalid input")
}

async fn read_multipart(mut multipart: Multipart) -> Result<CredentialsRequest, AppError> {
    let mut body = CredentialsRequest::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!(error = %e, "Rejected multipart body");
        invalid_input()
    })? {
        let name = field.name().map(str::to_owned);
        let target = match name.as_deref() {
            Some("username") => &mut body.username,
            Some("password") => &mut body.password,
            _ => continue,
        };
        *target = field.text().await.map_err(|e| {
            debug!(error = %e, "Failed to read multipart field");
            invalid_input()
        })?;
    }
    Ok(body)
}

impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let body = if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<CredentialsRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    debug!(error = %e, "Rejected form body");
                    invalid_input()
                })?;
            body
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                debug!(error = %e, "Rejected multipart body");
                invalid_input()
            })?;
            read_multipart(multipart).await?
        } else {
            let bytes = Bytes::from_request(req, state).await.map_err(|e| {
                debug!(error = %e, "Failed to read body");
                invalid_input()
            })?;
            serde_json::from_slice(&bytes).map_err(|e| {
                debug!(error = %e, "Rejected JSON body");
                invalid_input()
            })?
        };

        Ok(Credentials(body))
    }
}
