//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use picshare_core::error::{AppError, ErrorKind};
use picshare_core::result::AppResult;
use picshare_core::traits::storage::{BlobStore, ByteStream};

/// Stores each blob as a file directly under a single directory.
///
/// The directory is created on the first write. Keys map one-to-one onto
/// file names; writing an existing key replaces the file.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Directory holding all blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root`. Nothing is touched on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to a path directly under the root.
    ///
    /// Returns `None` for keys that would name the root itself or escape
    /// it (empty, `.`, `..`, or containing a path separator).
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        if !is_plain_name(key) {
            return None;
        }
        Some(self.root.join(key))
    }
}

/// Whether `key` is a single, ordinary path component.
pub fn is_plain_name(key: &str) -> bool {
    !(key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0'))
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match fs::metadata(&self.root).await {
            Ok(meta) => Ok(meta.is_dir()),
            // Not created yet; the first upload will create it.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat upload directory: {}", self.root.display()),
                e,
            )),
        }
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        let path = self
            .resolve(key)
            .ok_or_else(|| AppError::not_found(format!("File not found: {key}")))?;

        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {key}"), e)
            }
        })?;

        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        let path = self
            .resolve(key)
            .ok_or_else(|| AppError::validation(format!("Invalid file name: {key}")))?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", self.root.display()),
                e,
            )
        })?;

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write file: {key}"), e)
        })?;

        debug!(key, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self.resolve(key) {
            Some(path) => Ok(fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)),
            None => Ok(false),
        }
    }
}
