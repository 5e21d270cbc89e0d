//! Event reporting for inventory operations.
//!
//! Every documented reporting point produces an [`InventoryEvent`]. The
//! event is logged through `tracing` at its level and then broadcast to
//! in-process subscribers:
//! - Mutations (items added, items removed)
//! - Problems (rejected input, missing items, missing files)
//! - Persistence (loads and saves)
//!
//! Subscribers use bounded buffers; a subscriber that falls behind is
//! dropped rather than blocking the store.
//!
//! # Example
//!
//! ```ignore
//! let inventory = Inventory::new();
//! let handle = inventory.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::problems(),
//!     ..Default::default()
//! });
//!
//! inventory.remove("grapes", 1)?;
//!
//! match handle.try_recv() {
//!     Ok(InventoryEvent::ItemMissing { item }) => println!("no {item} in stock"),
//!     _ => {}
//! }
//! ```

mod hub;
mod types;

pub use hub::EventHub;
pub use types::{
    DropReason, EventCategory, EventLevel, InventoryEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId,
};
