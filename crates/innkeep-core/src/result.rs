//! Convenience result type alias for Innkeep.

use crate::error::AppError;

/// A specialized `Result` type for Innkeep operations.
///
/// Every crate above the engine reports failures as [`AppError`], so this
/// alias saves writing `Result<T, AppError>` at each call site.
pub type AppResult<T> = Result<T, AppError>;
