//! Error types for the inventory store.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for inventory operations.
///
/// A missing item on removal and a missing file on load are not errors:
/// they surface as [`RemoveOutcome::NotFound`](crate::RemoveOutcome) and an
/// empty inventory respectively, each with a reported event.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Invalid item or quantity: item={item}, qty={quantity}")]
    InvalidInput { item: String, quantity: String },

    #[error("Corrupt inventory file {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InventoryError {
    pub(crate) fn invalid(item: impl ToString, quantity: impl ToString) -> Self {
        InventoryError::InvalidInput {
            item: item.to_string(),
            quantity: quantity.to_string(),
        }
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(e: serde_json::Error) -> Self {
        InventoryError::Serialization(e.to_string())
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
