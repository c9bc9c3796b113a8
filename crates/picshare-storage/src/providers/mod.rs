//! Blob store provider implementations.

pub mod local;
