//! Inventory levels, restocking and low-stock alerts.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use innkeep_core::error::AppError;
use innkeep_core::types::InventoryItemId;
use innkeep_entity::inventory::{InventoryItem, NewInventoryItem};
use innkeep_store::InventoryStore;

/// Manages supply inventory.
#[derive(Debug, Clone)]
pub struct InventoryService {
    /// Inventory store.
    items: Arc<dyn InventoryStore>,
    /// Whether an item sitting exactly at its minimum counts as low.
    low_stock_inclusive: bool,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(items: Arc<dyn InventoryStore>, low_stock_inclusive: bool) -> Self {
        Self {
            items,
            low_stock_inclusive,
        }
    }

    /// Adds a new item.
    pub async fn create(&self, req: NewInventoryItem) -> Result<InventoryItem, AppError> {
        req.validate()?;
        let item = self.items.save_item(req.into_item(Utc::now())).await?;
        info!(item_id = %item.id, name = %item.name, "Inventory item added");
        Ok(item)
    }

    /// Gets an item by ID.
    pub async fn get(&self, id: InventoryItemId) -> Result<InventoryItem, AppError> {
        self.items
            .find_item(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Inventory item {id} not found")))
    }

    /// Lists items, optionally restricted to one category (case-insensitive).
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<InventoryItem>, AppError> {
        let items = self.items.list_items().await?;
        Ok(match category {
            Some(category) => items
                .into_iter()
                .filter(|i| i.category.eq_ignore_ascii_case(category))
                .collect(),
            None => items,
        })
    }

    /// Items at or below their minimum level.
    pub async fn low_stock(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = self.items.list_items().await?;
        Ok(items
            .into_iter()
            .filter(|i| i.is_low_stock(self.low_stock_inclusive))
            .collect())
    }

    /// Sets the current level. Must not exceed the total quantity.
    pub async fn set_level(&self, id: InventoryItemId, level: u32) -> Result<InventoryItem, AppError> {
        let mut item = self.get(id).await?;
        item.set_level(level)?;
        self.store_level_change(item).await
    }

    /// Adds (positive) or removes (negative) units.
    pub async fn adjust(&self, id: InventoryItemId, delta: i64) -> Result<InventoryItem, AppError> {
        let mut item = self.get(id).await?;
        item.adjust(delta)?;
        self.store_level_change(item).await
    }

    /// Fills the item up to its total quantity.
    pub async fn restock(&self, id: InventoryItemId) -> Result<InventoryItem, AppError> {
        let mut item = self.get(id).await?;
        item.restock(Utc::now());
        let item = self.items.save_item(item).await?;
        info!(item_id = %id, level = item.current_level, "Inventory item restocked");
        Ok(item)
    }

    /// Removes an item.
    pub async fn delete(&self, id: InventoryItemId) -> Result<(), AppError> {
        self.items.delete_item(id).await
    }

    async fn store_level_change(&self, item: InventoryItem) -> Result<InventoryItem, AppError> {
        let item = self.items.save_item(item).await?;
        if item.is_low_stock(self.low_stock_inclusive) {
            warn!(
                item_id = %item.id,
                name = %item.name,
                level = item.current_level,
                minimum = item.minimum_level,
                "Inventory item is low on stock"
            );
        } else {
            info!(item_id = %item.id, level = item.current_level, "Inventory level updated");
        }
        Ok(item)
    }
}
