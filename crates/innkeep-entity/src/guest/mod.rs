//! Guest registry entities.

pub mod model;

pub use model::{Guest, NewGuest};
