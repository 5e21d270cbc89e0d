//! Error handling and edge case tests.

use inventory_store::{
    Inventory, InventoryError, InventoryEvent, Quantity, RemoveOutcome, SubscriptionConfig,
    SubscriptionFilter,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// --- Validation ---

#[test]
fn test_invalid_add_reports_warning() {
    let inventory = Inventory::new();
    let handle = inventory.subscribe(SubscriptionConfig {
        filter: SubscriptionFilter::problems(),
        ..Default::default()
    });

    let result = inventory.add_value(&json!(42), &json!(1), None);

    match result {
        Err(InventoryError::InvalidInput { item, quantity }) => {
            assert_eq!(item, "42");
            assert_eq!(quantity, "1");
        }
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
    assert!(inventory.is_empty());
    assert!(matches!(
        handle.try_recv(),
        Ok(InventoryEvent::ValidationFailed { .. })
    ));
}

#[test]
fn test_remove_rejects_non_finite() {
    let inventory = Inventory::new();
    inventory.add("apple", 5, None).unwrap();

    let result = inventory.remove("apple", f64::INFINITY);

    assert!(matches!(result, Err(InventoryError::InvalidInput { .. })));
    assert_eq!(inventory.get_quantity("apple"), Quantity::Int(5));
}

#[test]
fn test_empty_item_name_is_accepted() {
    let inventory = Inventory::new();
    inventory.add("", 1, None).unwrap();
    assert_eq!(inventory.get_quantity(""), Quantity::Int(1));
}

// --- Missing Data ---

#[test]
fn test_remove_missing_item_reports_warning() {
    let inventory = Inventory::new();
    let handle = inventory.subscribe(SubscriptionConfig::default());

    let outcome = inventory.remove("grapes", 1).unwrap();

    assert_eq!(outcome, RemoveOutcome::NotFound);
    assert!(inventory.is_empty());
    assert_eq!(
        handle.drain(),
        vec![InventoryEvent::ItemMissing {
            item: "grapes".to_string()
        }]
    );
}

#[test]
fn test_get_quantity_of_missing_item() {
    let inventory = Inventory::new();
    assert_eq!(inventory.get_quantity("nothing"), Quantity::ZERO);
}

#[test]
fn test_load_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let inventory = Inventory::load(&path).unwrap();

    assert!(inventory.is_empty());
    // Loading does not create the file
    assert!(!path.exists());
}

// --- Corrupt Data ---

#[test]
fn test_load_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, "{ not json").unwrap();

    let result = Inventory::load(&path);

    match result {
        Err(InventoryError::Corrupt { path: p, .. }) => assert_eq!(p, path),
        Err(other) => panic!("Expected Corrupt, got {:?}", other),
        Ok(_) => panic!("Expected Corrupt, got an inventory"),
    }
}

#[test]
fn test_load_non_numeric_quantity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, r#"{"apple": "7"}"#).unwrap();

    let inventory = Inventory::new();
    let result = inventory.load_map(&path);

    assert!(matches!(result, Err(InventoryError::Corrupt { .. })));
}

#[test]
fn test_load_empty_file_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, "").unwrap();

    assert!(matches!(
        Inventory::load(&path),
        Err(InventoryError::Corrupt { .. })
    ));
}

#[test]
fn test_load_directory_is_io_error() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        Inventory::load(dir.path()),
        Err(InventoryError::Io(_))
    ));
}

// --- Write Failures ---

#[test]
fn test_save_to_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("inventory.json");
    let inventory = Inventory::new();
    inventory.add("apple", 1, None).unwrap();
    let handle = inventory.subscribe(SubscriptionConfig::default());

    let result = inventory.save(&path);

    assert!(matches!(result, Err(InventoryError::Write { .. })));
    // No Saved event on failure
    assert!(handle.drain().is_empty());
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, r#"{"apple": 1}"#).unwrap();

    // A directory in the way of the rename target
    let blocked = dir.path().join("blocked");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("child"), "x").unwrap();

    let inventory = Inventory::new();
    inventory.add("apple", 2, None).unwrap();
    assert!(inventory.save(&blocked).is_err());

    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"apple": 1}"#);
    assert!(blocked.is_dir());
}
