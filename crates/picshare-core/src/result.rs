//! Convenience result type alias for PicShare.

use crate::error::AppError;

/// A specialized `Result` type for PicShare operations.
pub type AppResult<T> = Result<T, AppError>;
