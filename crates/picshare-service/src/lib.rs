//! # picshare-service
//!
//! Business logic for PicShare. Each service orchestrates repositories,
//! the blob store, and the token encoder to implement one group of API
//! operations.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod image;

pub use account::AccountService;
pub use image::{ExposedImage, ImageService};
