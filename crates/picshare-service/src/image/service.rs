//! Image catalog operations backed by the blob store.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use picshare_core::error::AppError;
use picshare_core::traits::storage::{BlobStore, ByteStream};
use picshare_database::repositories::ImageRepository;
use picshare_entity::image::{CreateImage, Image};
use picshare_storage::mime::content_type_for;
use picshare_storage::providers::local::is_plain_name;

/// Lists, stores, likes, and serves images.
#[derive(Debug, Clone)]
pub struct ImageService {
    /// Image repository.
    images: Arc<dyn ImageRepository>,
    /// Where uploaded bytes live.
    blobs: Arc<dyn BlobStore>,
}

/// An image body ready to be streamed to a client.
pub struct ExposedImage {
    /// File contents.
    pub body: ByteStream,
    /// Value for the `Content-Type` header.
    pub content_type: &'static str,
}

impl std::fmt::Debug for ExposedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExposedImage")
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(images: Arc<dyn ImageRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { images, blobs }
    }

    /// Returns every image record in id order.
    pub async fn list(&self) -> Result<Vec<Image>, AppError> {
        self.images.find_all().await
    }

    /// Stores `data` under the client's file name and records it with zero likes.
    ///
    /// Only the last path component of `client_filename` is used. An
    /// existing file with the same name is replaced.
    pub async fn upload(&self, client_filename: &str, data: Bytes) -> Result<Image, AppError> {
        let filename = base_name(client_filename);
        if !is_plain_name(filename) {
            return Err(AppError::validation("Invalid file"));
        }

        let size = data.len();
        self.blobs.write(filename, data).await?;

        let image = self
            .images
            .create(&CreateImage {
                filename: filename.to_string(),
            })
            .await?;

        info!(image_id = image.id, filename = %image.filename, size, "Image uploaded");
        Ok(image)
    }

    /// Adds one like to the image with the given id.
    ///
    /// The record is read, incremented, and written back without any
    /// guard, so concurrent likes on the same image may be lost.
    pub async fn like(&self, id: u64) -> Result<Image, AppError> {
        let image = self
            .images
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found"))?;

        let updated = self.images.save(&image.liked()).await?;
        debug!(image_id = updated.id, likes = updated.likes, "Image liked");
        Ok(updated)
    }

    /// Opens the stored file named `filename` for streaming.
    pub async fn expose(&self, filename: &str) -> Result<ExposedImage, AppError> {
        if !self.blobs.exists(filename).await? {
            return Err(AppError::not_found("Image not found"));
        }

        let body = self.blobs.read(filename).await?;
        Ok(ExposedImage {
            body,
            content_type: content_type_for(filename),
        })
    }
}

/// Final path component of a client-supplied file name.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
