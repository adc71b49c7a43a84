//! Supply inventory entities.

pub mod model;

pub use model::{InventoryItem, NewInventoryItem};
