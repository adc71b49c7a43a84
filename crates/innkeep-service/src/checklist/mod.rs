//! Per-booking checklists.

pub mod service;
pub mod template;

pub use service::ChecklistService;
pub use template::ChecklistTemplate;
