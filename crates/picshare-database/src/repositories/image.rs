//! MySQL-backed image repository.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use picshare_core::error::{AppError, ErrorKind};
use picshare_core::result::AppResult;
use picshare_entity::image::{CreateImage, Image};

use super::ImageRepository;

/// Image repository over the `images` table.
#[derive(Debug, Clone)]
pub struct MySqlImageRepository {
    pool: MySqlPool,
}

impl MySqlImageRepository {
    /// Create a new image repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for MySqlImageRepository {
    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        let result = sqlx::query("INSERT INTO images (filename, likes) VALUES (?, 0)")
            .bind(&data.filename)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create image record", e)
            })?;

        let id = result.last_insert_id();
        debug!(id, filename = %data.filename, "Inserted image record");

        Ok(Image {
            id,
            filename: data.filename.clone(),
            likes: 0,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>("SELECT id, filename, likes FROM images ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))
    }

    async fn find_by_id(&self, id: u64) -> AppResult<Option<Image>> {
        sqlx::query_as::<_, Image>("SELECT id, filename, likes FROM images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find image by id", e)
            })
    }

    async fn save(&self, image: &Image) -> AppResult<Image> {
        sqlx::query("UPDATE images SET filename = ?, likes = ? WHERE id = ?")
            .bind(&image.filename)
            .bind(image.likes)
            .bind(image.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save image", e))?;

        debug!(id = image.id, likes = image.likes, "Saved image record");
        Ok(image.clone())
    }
}
