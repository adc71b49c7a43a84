//! # innkeep-core
//!
//! Core crate for Innkeep. Contains configuration schemas, typed
//! identifiers, the half-open [`StayRange`](types::StayRange) used by every
//! booking calculation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Innkeep crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
