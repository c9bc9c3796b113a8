//! Image handlers: list, upload, like, and serve.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tracing::{debug, info};

use picshare_core::error::{AppError, ErrorKind};
use picshare_entity::image::Image;

use crate::error::ApiResult;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// Multipart field holding the uploaded file.
const IMAGE_FIELD: &str = "image";

fn invalid_file() -> AppError {
    AppError::validation("Invalid file")
}

/// GET /api/images
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Json<Vec<Image>>> {
    let images = state.image_service.list().await?;
    Ok(Json(images))
}

/// POST /api/images
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthAccount,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, &'static str)> {
    let mut multipart = multipart.map_err(|e| {
        debug!(error = %e, "Upload is not a multipart body");
        invalid_file()
    })?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!(error = %e, "Multipart error");
        invalid_file()
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        // A plain form value under the same name is not a file.
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        let data = field.bytes().await.map_err(|e| {
            debug!(error = %e, "Failed to read upload");
            invalid_file()
        })?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or_else(invalid_file)?;
    let image = state.image_service.upload(&file_name, data).await?;

    info!(account_id = auth.account_id, image_id = image.id, "Upload stored");
    Ok((StatusCode::CREATED, "Image uploaded successfully"))
}

/// POST /api/images/{id}/like
pub async fn like_image(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<String>,
) -> ApiResult<&'static str> {
    let id: u64 = id
        .parse()
        .map_err(|_| AppError::not_found("Image not found"))?;

    let image = state.image_service.like(id).await?;
    debug!(account_id = auth.account_id, image_id = image.id, likes = image.likes, "Like recorded");
    Ok("Like toggled successfully")
}

/// GET /api/images/expose/{filename}
pub async fn expose_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let exposed = state.image_service.expose(&filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, exposed.content_type)
        .body(Body::from_stream(exposed.body))
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build response", e))?;
    Ok(response)
}
