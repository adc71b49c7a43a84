//! Inventory item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use innkeep_core::AppError;
use innkeep_core::types::InventoryItemId;

/// A tracked supply, e.g. towels or shampoo bottles.
///
/// Invariant: `current_level <= quantity`. Every mutator checks it and
/// leaves the item untouched when the check fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique item identifier.
    pub id: InventoryItemId,
    /// Item name.
    pub name: String,
    /// Free-form category, e.g. `"linen"`.
    pub category: String,
    /// Full stock level (capacity).
    pub quantity: u32,
    /// Units currently on hand.
    pub current_level: u32,
    /// Low-stock threshold.
    pub minimum_level: u32,
    /// Unit label, e.g. `"piece"` or `"box"`.
    pub unit: String,
    /// When the item was last restocked to full.
    pub last_restocked: DateTime<Utc>,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryItem {
    /// Set the on-hand level directly.
    pub fn set_level(&mut self, level: u32) -> Result<(), AppError> {
        if level > self.quantity {
            return Err(AppError::validation(format!(
                "Current level {level} cannot exceed total quantity {} for '{}'",
                self.quantity, self.name
            )));
        }
        self.current_level = level;
        Ok(())
    }

    /// Add (positive) or remove (negative) units.
    pub fn adjust(&mut self, delta: i64) -> Result<(), AppError> {
        let target = i64::from(self.current_level) + delta;
        if target < 0 {
            return Err(AppError::validation(format!(
                "Cannot remove {} {} of '{}': only {} on hand",
                -delta, self.unit, self.name, self.current_level
            )));
        }
        let level = u32::try_from(target)
            .map_err(|_| AppError::validation(format!("Level {target} is out of range")))?;
        self.set_level(level)
    }

    /// Fill back up to full quantity.
    pub fn restock(&mut self, now: DateTime<Utc>) {
        self.current_level = self.quantity;
        self.last_restocked = now;
    }

    /// Whether the item is at or below its threshold (`inclusive`) or
    /// strictly below it.
    pub fn is_low_stock(&self, inclusive: bool) -> bool {
        if inclusive {
            self.current_level <= self.minimum_level
        } else {
            self.current_level < self.minimum_level
        }
    }
}

/// Data required to start tracking a supply.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_levels"))]
pub struct NewInventoryItem {
    /// Item name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    /// Full stock level.
    pub quantity: u32,
    /// Units currently on hand.
    pub current_level: u32,
    /// Low-stock threshold.
    pub minimum_level: u32,
    /// Unit label.
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn validate_levels(item: &NewInventoryItem) -> Result<(), ValidationError> {
    if item.current_level > item.quantity {
        return Err(ValidationError::new("current_level_exceeds_quantity"));
    }
    Ok(())
}

impl NewInventoryItem {
    /// Materialize the stored record, stamping `last_restocked` with `now`.
    pub fn into_item(self, now: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id: InventoryItemId::new(),
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            current_level: self.current_level,
            minimum_level: self.minimum_level,
            unit: self.unit,
            last_restocked: now,
            notes: self.notes,
        }
    }
}
