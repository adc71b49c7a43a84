//! Checklist template instantiated at check-in.

use innkeep_core::AppError;
use innkeep_core::config::checklist::ChecklistConfig;
use innkeep_core::types::BookingId;
use innkeep_entity::checklist::{ChecklistCategory, ChecklistItem};

/// Parsed checklist template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistTemplate {
    entries: Vec<(String, ChecklistCategory)>,
}

impl ChecklistTemplate {
    /// Builds a template from `(text, category)` pairs.
    pub fn new(entries: Vec<(String, ChecklistCategory)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh, unchecked items for `booking_id`.
    pub fn instantiate(&self, booking_id: BookingId) -> Vec<ChecklistItem> {
        self.entries
            .iter()
            .map(|(item, category)| ChecklistItem::new(booking_id, item.clone(), *category))
            .collect()
    }
}

impl TryFrom<&ChecklistConfig> for ChecklistTemplate {
    type Error = AppError;

    fn try_from(config: &ChecklistConfig) -> Result<Self, Self::Error> {
        let entries = config
            .template
            .iter()
            .map(|entry| {
                let category = entry.category.parse::<ChecklistCategory>().map_err(|e| {
                    AppError::configuration(format!(
                        "Invalid checklist template entry '{}': {}",
                        entry.item, e.message
                    ))
                })?;
                Ok((entry.item.clone(), category))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { entries })
    }
}
