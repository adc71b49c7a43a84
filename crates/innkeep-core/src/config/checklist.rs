//! Room inspection checklist template.

use serde::{Deserialize, Serialize};

/// Checklist created for every booking at check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// Items copied onto the booking, in order.
    #[serde(default = "default_template")]
    pub template: Vec<ChecklistTemplateItem>,
}

/// One templated checklist line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplateItem {
    /// Task text shown to staff.
    pub item: String,
    /// Category tag, e.g. `"room_inspection"` or `"amenities"`.
    pub category: String,
}

impl ChecklistTemplateItem {
    fn new(item: &str, category: &str) -> Self {
        Self {
            item: item.to_string(),
            category: category.to_string(),
        }
    }
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
        }
    }
}

fn default_template() -> Vec<ChecklistTemplateItem> {
    vec![
        ChecklistTemplateItem::new("Television remote works and has batteries", "amenities"),
        ChecklistTemplateItem::new("Air conditioning operational", "maintenance"),
        ChecklistTemplateItem::new("Soap, shampoo and toilet paper stocked", "cleaning"),
        ChecklistTemplateItem::new("Bed made with clean linens", "cleaning"),
        ChecklistTemplateItem::new("Clean towels available (2 bath, 2 hand)", "cleaning"),
        ChecklistTemplateItem::new("Mini bar stocked and priced", "amenities"),
        ChecklistTemplateItem::new("Room key card programmed", "room_inspection"),
        ChecklistTemplateItem::new("Wi-Fi instructions visible and correct", "guest_services"),
    ]
}
