//! Core type definitions used across the Innkeep workspace.

pub mod id;
pub mod stay;

pub use id::*;
pub use stay::StayRange;
