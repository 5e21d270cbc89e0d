//! Inventory configuration.

use std::path::PathBuf;

/// Default inventory file name.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";

/// Default low-stock threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Inventory configuration.
#[derive(Clone, Debug)]
pub struct InventoryConfig {
    /// File used by [`Inventory::save_default`](crate::Inventory::save_default).
    pub path: PathBuf,

    /// Threshold used by [`Inventory::check_low_default`](crate::Inventory::check_low_default).
    pub low_stock_threshold: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INVENTORY_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
