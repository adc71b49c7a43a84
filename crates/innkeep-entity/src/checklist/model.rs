//! Checklist item entity and progress summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use innkeep_core::types::{BookingId, ChecklistItemId};

use super::category::ChecklistCategory;

/// One inspection task attached to a checked-in booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique item identifier.
    pub id: ChecklistItemId,
    /// Owning booking.
    pub booking_id: BookingId,
    /// Task text.
    pub item: String,
    /// Grouping tag.
    pub category: ChecklistCategory,
    /// Whether staff ticked the task off.
    #[serde(default)]
    pub completed: bool,
    /// Staff remarks.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ChecklistItem {
    /// Create an open task for a booking.
    pub fn new(booking_id: BookingId, item: impl Into<String>, category: ChecklistCategory) -> Self {
        Self {
            id: ChecklistItemId::new(),
            booking_id,
            item: item.into(),
            category,
            completed: false,
            notes: None,
        }
    }

    /// Flip the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// How far along a booking's checklist is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    /// Completed tasks.
    pub completed: usize,
    /// All tasks.
    pub total: usize,
}

impl ChecklistProgress {
    /// Summarize a list of items.
    pub fn of(items: &[ChecklistItem]) -> Self {
        Self {
            completed: items.iter().filter(|i| i.completed).count(),
            total: items.len(),
        }
    }

    /// Rounded completion percentage; an empty checklist is 0%.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Check whether every task is done. An empty checklist is not complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Group items by category, preserving their order within each group.
pub fn group_by_category(items: &[ChecklistItem]) -> BTreeMap<ChecklistCategory, Vec<&ChecklistItem>> {
    let mut groups: BTreeMap<ChecklistCategory, Vec<&ChecklistItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ChecklistItem> {
        let booking = BookingId::new();
        let mut items = vec![
            ChecklistItem::new(booking, "Towels", ChecklistCategory::Cleaning),
            ChecklistItem::new(booking, "Remote", ChecklistCategory::Amenities),
            ChecklistItem::new(booking, "Linens", ChecklistCategory::Cleaning),
        ];
        items[0].toggle();
        items
    }

    #[test]
    fn test_progress() {
        let progress = ChecklistProgress::of(&items());
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percent(), 33);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_empty_progress() {
        let progress = ChecklistProgress::of(&[]);
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_group_by_category_keeps_order() {
        let items = items();
        let groups = group_by_category(&items);
        let cleaning = &groups[&ChecklistCategory::Cleaning];
        assert_eq!(cleaning.len(), 2);
        assert_eq!(cleaning[0].item, "Towels");
        assert_eq!(cleaning[1].item, "Linens");
        assert_eq!(groups[&ChecklistCategory::Amenities].len(), 1);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Guest Services".parse::<ChecklistCategory>().unwrap(),
            ChecklistCategory::GuestServices
        );
        assert!("laundry".parse::<ChecklistCategory>().is_err());
    }
}
