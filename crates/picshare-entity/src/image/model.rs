//! Image record entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An uploaded image as recorded in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Image {
    /// System-assigned identifier.
    pub id: u64,
    /// Name of the stored blob holding this image's bytes.
    pub filename: String,
    /// Number of likes received. Starts at zero.
    pub likes: i64,
}

impl Image {
    /// Return a copy with the like count incremented by one.
    pub fn liked(&self) -> Self {
        Self {
            likes: self.likes + 1,
            ..self.clone()
        }
    }
}

/// Data required to create a new image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    /// Stored blob name.
    pub filename: String,
}
