//! Blob storage trait for uploaded file bytes.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Flat key/value store for uploaded bytes, keyed by filename.
///
/// Writes to an existing key replace its contents; the store performs no
/// collision handling. The [`BlobStore`] trait is defined here in
/// `picshare-core` and implemented in `picshare-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backing location is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Open a stored blob as a byte stream. Missing keys yield `NotFound`.
    async fn read(&self, key: &str) -> AppResult<ByteStream>;

    /// Store `data` under `key`, overwriting any previous contents.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Check whether a blob exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
