//! Per-booking room inspection checklist.

pub mod category;
pub mod model;

pub use category::ChecklistCategory;
pub use model::{ChecklistItem, ChecklistProgress, group_by_category};
