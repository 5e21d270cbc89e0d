//! # Inventory Store
//!
//! An in-memory inventory of item quantities with JSON file persistence.
//!
//! ## Core Concepts
//!
//! - **Inventory**: Item name to quantity, kept in insertion order
//! - **Quantity**: Whole counts or real amounts, compared numerically
//! - **Audit log**: Caller-owned lines recording each add
//! - **Events**: Every notable outcome is logged and can be subscribed to
//!
//! ## Example
//!
//! ```no_run
//! use inventory_store::{AuditLog, Inventory};
//!
//! # fn main() -> inventory_store::Result<()> {
//! let inventory = Inventory::load("inventory.json")?;
//!
//! let mut log = AuditLog::new();
//! inventory.add("apple", 10, Some(&mut log))?;
//! inventory.remove("apple", 3)?;
//!
//! println!("Low items: {:?}", inventory.check_low(5));
//! inventory.save("inventory.json")?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod events;
pub mod persist;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-exports
pub use audit::{AuditEntry, AuditLog};
pub use config::{InventoryConfig, DEFAULT_INVENTORY_FILE, DEFAULT_LOW_STOCK_THRESHOLD};
pub use error::{InventoryError, Result};
pub use events::{
    DropReason, EventCategory, EventHub, EventLevel, InventoryEvent, SubscriptionConfig,
    SubscriptionFilter, SubscriptionHandle, SubscriptionId,
};
pub use store::Inventory;
pub use types::{InventoryMap, Quantity, RemoveOutcome};
