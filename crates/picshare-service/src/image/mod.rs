//! Image listing, upload, likes, and serving.

pub mod service;

pub use service::{ExposedImage, ImageService};
