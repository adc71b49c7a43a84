//! Supply inventory settings.

use serde::{Deserialize, Serialize};

/// Inventory alerting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Treat `current_level == minimum_level` as low stock.
    #[serde(default = "default_true")]
    pub low_stock_inclusive: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_inclusive: true,
        }
    }
}

fn default_true() -> bool {
    true
}
