//! # picshare-storage
//!
//! Blob storage for uploaded image bytes. The only provider is a flat
//! directory on the local filesystem.

pub mod mime;
pub mod providers;

pub use providers::local::LocalBlobStore;
