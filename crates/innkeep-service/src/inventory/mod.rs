//! Supply inventory.

pub mod service;

pub use service::InventoryService;
