//! Core traits defined in `picshare-core` and implemented by other crates.

pub mod storage;

pub use storage::{BlobStore, ByteStream};
