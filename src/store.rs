//! The inventory store: item quantities, queries and persistence.

use crate::audit::{AuditEntry, AuditLog};
use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::events::{
    EventHub, InventoryEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};
use crate::persist;
use crate::types::{InventoryMap, Quantity, RemoveOutcome};
use parking_lot::RwLock;
use std::io::{self, Write};
use std::path::Path;

/// An in-memory inventory of item quantities.
///
/// Provides a unified interface for:
/// - Adding and removing stock
/// - Quantity and low-stock queries
/// - Loading from and saving to a JSON file
/// - Subscribing to the events each operation reports
///
/// All mutations hold a single write lock for their whole
/// read-modify-write, so an `Inventory` can be shared across threads.
/// Events are reported after the lock is released.
pub struct Inventory {
    config: InventoryConfig,

    /// Item quantities in insertion order.
    items: RwLock<InventoryMap>,

    events: EventHub,
}

impl Inventory {
    /// Create an empty inventory with the default configuration.
    pub fn new() -> Self {
        Self::with_config(InventoryConfig::default())
    }

    /// Create an empty inventory.
    pub fn with_config(config: InventoryConfig) -> Self {
        Self {
            config,
            items: RwLock::new(InventoryMap::new()),
            events: EventHub::new(),
        }
    }

    /// Create an inventory holding `items`.
    pub fn from_map(items: InventoryMap) -> Self {
        let inventory = Self::new();
        inventory.merge(items);
        inventory
    }

    /// Open the inventory stored at `config.path`.
    ///
    /// A missing file yields an empty inventory (reported at error level).
    /// Malformed content is returned as [`InventoryError::Corrupt`].
    pub fn open(config: InventoryConfig) -> Result<Self> {
        let inventory = Self::with_config(config);
        let items = inventory.load_map(&inventory.config.path)?;
        inventory.merge(items);
        Ok(inventory)
    }

    /// Open the inventory stored at `path` with otherwise default settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(InventoryConfig {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    // --- Mutations ---

    /// Add `quantity` of `item`, creating the entry at zero if absent.
    ///
    /// Negative quantities are accepted and may leave the entry at or below
    /// zero; only [`remove`](Self::remove) deletes entries. A non-finite
    /// quantity, or one that would overflow the stored total to infinity,
    /// is rejected without touching the inventory.
    ///
    /// Returns the stored quantity after the add.
    pub fn add(
        &self,
        item: &str,
        quantity: impl Into<Quantity>,
        log: Option<&mut AuditLog>,
    ) -> Result<Quantity> {
        let quantity = quantity.into();
        if !quantity.is_finite() {
            return Err(self.reject(item.to_string(), quantity.to_string()));
        }

        let total = {
            let mut items = self.items.write();
            let total = items.get(item).copied().unwrap_or(Quantity::ZERO) + quantity;
            if total.is_finite() {
                items.insert(item.to_string(), total);
            }
            total
        };
        if !total.is_finite() {
            return Err(self.reject(item.to_string(), quantity.to_string()));
        }

        if let Some(log) = log {
            log.push(AuditEntry::added(item, quantity));
        }
        self.events.report(InventoryEvent::ItemAdded {
            item: item.to_string(),
            quantity,
            total,
        });

        Ok(total)
    }

    /// Add from untyped input: `item` must be a JSON string and `quantity`
    /// a JSON number.
    pub fn add_value(
        &self,
        item: &serde_json::Value,
        quantity: &serde_json::Value,
        log: Option<&mut AuditLog>,
    ) -> Result<Quantity> {
        match (item.as_str(), Quantity::from_json(quantity)) {
            (Some(name), Some(qty)) => self.add(name, qty, log),
            _ => Err(self.reject(item.to_string(), quantity.to_string())),
        }
    }

    /// Take `quantity` of `item` out of stock.
    ///
    /// The entry is deleted once its quantity reaches zero or below. An item
    /// that is not stocked is reported and left alone. A removal whose result
    /// would overflow to infinity is rejected.
    pub fn remove(&self, item: &str, quantity: impl Into<Quantity>) -> Result<RemoveOutcome> {
        let quantity = quantity.into();
        if !quantity.is_finite() {
            return Err(self.reject(item.to_string(), quantity.to_string()));
        }

        let outcome = {
            let mut items = self.items.write();
            match items.get(item).copied() {
                None => RemoveOutcome::NotFound,
                Some(stored) => {
                    let remaining = stored - quantity;
                    if !remaining.is_finite() {
                        drop(items);
                        return Err(self.reject(item.to_string(), quantity.to_string()));
                    }
                    if remaining.is_positive() {
                        if let Some(slot) = items.get_mut(item) {
                            *slot = remaining;
                        }
                        RemoveOutcome::Decremented { remaining }
                    } else {
                        items.shift_remove(item);
                        RemoveOutcome::Removed
                    }
                }
            }
        };

        match outcome {
            RemoveOutcome::NotFound => self.events.report(InventoryEvent::ItemMissing {
                item: item.to_string(),
            }),
            RemoveOutcome::Removed => self.events.report(InventoryEvent::ItemRemoved {
                item: item.to_string(),
            }),
            RemoveOutcome::Decremented { .. } => {}
        }

        Ok(outcome)
    }

    /// Fold `items` into the inventory, overwriting existing quantities.
    ///
    /// New items are appended in `items` order; existing items keep their
    /// position. Non-finite quantities are reported and skipped. Returns the
    /// number of entries merged.
    pub fn merge(&self, items: InventoryMap) -> usize {
        let mut rejected = Vec::new();
        let mut merged = 0;

        {
            let mut stored = self.items.write();
            for (item, quantity) in items {
                if quantity.is_finite() {
                    stored.insert(item, quantity);
                    merged += 1;
                } else {
                    rejected.push((item, quantity));
                }
            }
        }

        for (item, quantity) in rejected {
            self.events.report(InventoryEvent::ValidationFailed {
                item,
                quantity: quantity.to_string(),
            });
        }
        merged
    }

    // --- Queries ---

    /// Stored quantity of `item`, or zero if it is not stocked.
    pub fn get_quantity(&self, item: &str) -> Quantity {
        self.items.read().get(item).copied().unwrap_or(Quantity::ZERO)
    }

    /// Items whose quantity is strictly below `threshold`, in inventory order.
    pub fn check_low(&self, threshold: impl Into<Quantity>) -> Vec<String> {
        let threshold = threshold.into();
        self.items
            .read()
            .iter()
            .filter(|(_, quantity)| **quantity < threshold)
            .map(|(item, _)| item.clone())
            .collect()
    }

    /// [`check_low`](Self::check_low) with the configured threshold.
    pub fn check_low_default(&self) -> Vec<String> {
        self.check_low(self.config.low_stock_threshold)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.read().contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> InventoryMap {
        self.items.read().clone()
    }

    /// Write a human-readable listing, one `item -> quantity` line per entry.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let items = self.items.read();
        writeln!(out, "Items Report")?;
        for (item, quantity) in items.iter() {
            writeln!(out, "{} -> {}", item, quantity)?;
        }
        Ok(())
    }

    // --- Persistence ---

    /// Read the map stored at `path` without touching this inventory.
    ///
    /// A missing file yields an empty map.
    pub fn load_map(&self, path: impl AsRef<Path>) -> Result<InventoryMap> {
        let path = path.as_ref();
        match persist::read_map(path)? {
            Some(items) => {
                self.events.report(InventoryEvent::Loaded {
                    path: path.to_path_buf(),
                    items: items.len(),
                });
                Ok(items)
            }
            None => {
                self.events.report(InventoryEvent::LoadMissing {
                    path: path.to_path_buf(),
                });
                Ok(InventoryMap::new())
            }
        }
    }

    /// Write the inventory to `path` as an indented JSON object.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let items = self.snapshot();

        persist::write_map(path, &items)?;

        self.events.report(InventoryEvent::Saved {
            path: path.to_path_buf(),
            items: items.len(),
        });
        Ok(())
    }

    /// [`save`](Self::save) to the configured path.
    pub fn save_default(&self) -> Result<()> {
        self.save(&self.config.path)
    }

    // --- Events ---

    /// Subscribe to reported events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.events.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    fn reject(&self, item: String, quantity: String) -> InventoryError {
        let err = InventoryError::invalid(&item, &quantity);
        self.events
            .report(InventoryEvent::ValidationFailed { item, quantity });
        err
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stocked() -> Inventory {
        let inventory = Inventory::new();
        inventory.add("apple", 10, None).unwrap();
        inventory.add("banana", -2, None).unwrap();
        inventory.add("orange", 6, None).unwrap();
        inventory
    }

    #[test]
    fn test_add_creates_and_increments() {
        let inventory = Inventory::new();

        assert_eq!(inventory.add("apple", 10, None).unwrap(), Quantity::Int(10));
        assert_eq!(inventory.add("apple", 2.5, None).unwrap(), Quantity::Float(12.5));
        assert_eq!(inventory.get_quantity("apple"), Quantity::Float(12.5));
    }

    #[test]
    fn test_add_negative_keeps_entry() {
        // add never floors at zero; the entry stays with a negative quantity
        let inventory = Inventory::new();
        inventory.add("banana", -2, None).unwrap();

        assert!(inventory.contains("banana"));
        assert_eq!(inventory.get_quantity("banana"), Quantity::Int(-2));

        inventory.add("banana", 2, None).unwrap();
        assert!(inventory.contains("banana"));
        assert_eq!(inventory.get_quantity("banana"), Quantity::ZERO);
    }

    #[test]
    fn test_add_appends_audit_entry() {
        let inventory = Inventory::new();
        let mut log = AuditLog::new();

        inventory.add("apple", 10, Some(&mut log)).unwrap();
        inventory.add("pear", 3, None).unwrap();
        inventory.add("apple", 1, Some(&mut log)).unwrap();

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Added 10 of apple"));
        assert!(lines[1].ends_with("Added 1 of apple"));
    }

    #[test]
    fn test_add_rejects_non_finite() {
        let inventory = Inventory::new();
        let mut log = AuditLog::new();

        let result = inventory.add("apple", f64::NAN, Some(&mut log));

        assert!(matches!(result, Err(InventoryError::InvalidInput { .. })));
        assert!(inventory.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_add_rejects_overflowing_total() {
        let inventory = Inventory::new();
        let mut log = AuditLog::new();
        inventory.add("x", 1e308, Some(&mut log)).unwrap();
        let before = inventory.snapshot();

        let result = inventory.add("x", 1e308, Some(&mut log));

        assert!(matches!(result, Err(InventoryError::InvalidInput { .. })));
        assert_eq!(inventory.snapshot(), before);
        assert_eq!(inventory.get_quantity("x"), Quantity::Float(1e308));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_rejects_overflowing_remainder() {
        let inventory = Inventory::new();
        inventory.add("x", 1e308, None).unwrap();

        let result = inventory.remove("x", -1e308);

        assert!(matches!(result, Err(InventoryError::InvalidInput { .. })));
        assert_eq!(inventory.get_quantity("x"), Quantity::Float(1e308));
    }

    #[test]
    fn test_add_value_validates_types() {
        let inventory = stocked();
        let before = inventory.snapshot();

        for (item, qty) in [
            (json!(123), json!(10)),
            (json!(null), json!(10)),
            (json!("apple"), json!("ten")),
            (json!("apple"), json!([1])),
            (json!(["apple"]), json!(true)),
        ] {
            let result = inventory.add_value(&item, &qty, None);
            assert!(matches!(result, Err(InventoryError::InvalidInput { .. })));
        }
        assert_eq!(inventory.snapshot(), before);

        inventory.add_value(&json!("apple"), &json!(5), None).unwrap();
        assert_eq!(inventory.get_quantity("apple"), Quantity::Int(15));
    }

    #[test]
    fn test_remove_decrements() {
        let inventory = stocked();

        let outcome = inventory.remove("apple", 3).unwrap();

        assert_eq!(outcome, RemoveOutcome::Decremented { remaining: Quantity::Int(7) });
        assert_eq!(inventory.get_quantity("apple"), Quantity::Int(7));
    }

    #[test]
    fn test_remove_to_zero_deletes_entry() {
        let inventory = stocked();

        assert_eq!(inventory.remove("orange", 6).unwrap(), RemoveOutcome::Removed);
        assert!(!inventory.contains("orange"));

        assert_eq!(inventory.remove("apple", 50).unwrap(), RemoveOutcome::Removed);
        assert!(!inventory.contains("apple"));
        assert_eq!(inventory.get_quantity("apple"), Quantity::ZERO);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let inventory = stocked();
        let before = inventory.snapshot();

        assert_eq!(inventory.remove("grapes", 1).unwrap(), RemoveOutcome::NotFound);
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let inventory = stocked();
        inventory.remove("banana", 0).unwrap();

        let keys: Vec<_> = inventory.snapshot().keys().cloned().collect();
        assert_eq!(keys, vec!["apple", "orange"]);
    }

    #[test]
    fn test_check_low() {
        let inventory = stocked();

        assert_eq!(inventory.check_low(5), vec!["banana"]);
        assert_eq!(inventory.check_low(7), vec!["banana", "orange"]);
        assert_eq!(inventory.check_low(100), vec!["apple", "banana", "orange"]);
        assert!(inventory.check_low(-2).is_empty());
        assert_eq!(inventory.check_low_default(), vec!["banana"]);
    }

    #[test]
    fn test_merge_overwrites_and_skips_non_finite() {
        let inventory = stocked();
        let mut incoming = InventoryMap::new();
        incoming.insert("kiwi".to_string(), Quantity::Int(4));
        incoming.insert("apple".to_string(), Quantity::Int(1));
        incoming.insert("lime".to_string(), Quantity::Float(f64::INFINITY));

        assert_eq!(inventory.merge(incoming), 2);

        let keys: Vec<_> = inventory.snapshot().keys().cloned().collect();
        assert_eq!(keys, vec!["apple", "banana", "orange", "kiwi"]);
        assert_eq!(inventory.get_quantity("apple"), Quantity::Int(1));
        assert!(!inventory.contains("lime"));
    }

    #[test]
    fn test_write_report() {
        let inventory = stocked();
        let mut out = Vec::new();

        inventory.write_report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Items Report\napple -> 10\nbanana -> -2\norange -> 6\n"
        );
    }
}
