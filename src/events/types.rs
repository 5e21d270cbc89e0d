//! Event and subscription types.

use crate::types::Quantity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How much a subscriber may fall behind, and what it wants to see.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Unread events held for the subscriber. One more and it is cut off.
    pub buffer_size: usize,

    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            filter: SubscriptionFilter::all(),
        }
    }
}

/// Event categories a subscriber opts into. The derived default opts into none.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Include successful adds and removals.
    pub include_mutations: bool,

    /// Include rejected input, missing items and missing files.
    pub include_problems: bool,

    /// Include loads and saves.
    pub include_persistence: bool,
}

impl SubscriptionFilter {
    pub fn mutations() -> Self {
        Self {
            include_mutations: true,
            ..Default::default()
        }
    }

    pub fn problems() -> Self {
        Self {
            include_problems: true,
            ..Default::default()
        }
    }

    pub fn persistence() -> Self {
        Self {
            include_persistence: true,
            ..Default::default()
        }
    }

    /// Subscribe to everything.
    pub fn all() -> Self {
        Self {
            include_mutations: true,
            include_problems: true,
            include_persistence: true,
        }
    }

    pub(crate) fn matches(&self, event: &InventoryEvent) -> bool {
        match event.category() {
            EventCategory::Mutation => self.include_mutations,
            EventCategory::Problem => self.include_problems,
            EventCategory::Persistence => self.include_persistence,
            EventCategory::Lifecycle => true,
        }
    }
}

/// Severity an event is logged at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

/// Broad grouping used for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventCategory {
    Mutation,
    Problem,
    Persistence,
    Lifecycle,
}

/// Events reported by the inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryEvent {
    // --- Mutations ---
    /// Quantity was added to an item.
    ItemAdded {
        item: String,
        quantity: Quantity,
        /// Stored quantity after the add.
        total: Quantity,
    },

    /// An item's quantity fell to zero or below and its entry was deleted.
    ItemRemoved { item: String },

    // --- Problems ---
    /// Input was rejected before touching the inventory.
    ValidationFailed { item: String, quantity: String },

    /// A removal named an item that is not stocked.
    ItemMissing { item: String },

    /// The inventory file did not exist; an empty inventory was used.
    LoadMissing { path: PathBuf },

    // --- Persistence ---
    Loaded { path: PathBuf, items: usize },

    Saved { path: PathBuf, items: usize },

    // --- Lifecycle ---
    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

impl InventoryEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            InventoryEvent::ItemAdded { .. }
            | InventoryEvent::ItemRemoved { .. }
            | InventoryEvent::Loaded { .. }
            | InventoryEvent::Saved { .. }
            | InventoryEvent::Dropped { .. } => EventLevel::Info,
            InventoryEvent::ValidationFailed { .. } | InventoryEvent::ItemMissing { .. } => {
                EventLevel::Warn
            }
            InventoryEvent::LoadMissing { .. } => EventLevel::Error,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            InventoryEvent::ItemAdded { .. } | InventoryEvent::ItemRemoved { .. } => {
                EventCategory::Mutation
            }
            InventoryEvent::ValidationFailed { .. }
            | InventoryEvent::ItemMissing { .. }
            | InventoryEvent::LoadMissing { .. } => EventCategory::Problem,
            InventoryEvent::Loaded { .. } | InventoryEvent::Saved { .. } => {
                EventCategory::Persistence
            }
            InventoryEvent::Dropped { .. } => EventCategory::Lifecycle,
        }
    }

    /// Write the event to the tracing subscriber at its level.
    pub fn log(&self) {
        match self {
            InventoryEvent::ItemAdded { item, quantity, total } => {
                tracing::info!(%item, %quantity, %total, "Added {} of {}", quantity, item);
            }
            InventoryEvent::ItemRemoved { item } => {
                tracing::info!(%item, "Item '{}' removed from inventory.", item);
            }
            InventoryEvent::ValidationFailed { item, quantity } => {
                tracing::warn!(
                    %item,
                    %quantity,
                    "Invalid item or quantity type: item={}, qty={}",
                    item,
                    quantity
                );
            }
            InventoryEvent::ItemMissing { item } => {
                tracing::warn!(%item, "Attempted to remove non-existent item: {}", item);
            }
            InventoryEvent::LoadMissing { path } => {
                tracing::error!(
                    path = %path.display(),
                    "File {} not found. Starting with empty inventory.",
                    path.display()
                );
            }
            InventoryEvent::Loaded { path, items } => {
                tracing::info!(path = %path.display(), items, "Data loaded successfully from {}", path.display());
            }
            InventoryEvent::Saved { path, items } => {
                tracing::info!(path = %path.display(), items, "Data saved successfully to {}", path.display());
            }
            InventoryEvent::Dropped { reason } => {
                tracing::debug!(?reason, "subscription dropped");
            }
        }
    }
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription. Dropping it disconnects the channel;
/// the hub removes the entry on its next delivery attempt.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<InventoryEvent>,
}

impl SubscriptionHandle {
    /// Blocks until an event arrives or the hub is gone.
    pub fn recv(&self) -> Result<InventoryEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    pub fn try_recv(&self) -> Result<InventoryEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<InventoryEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything buffered right now, oldest first.
    pub fn drain(&self) -> Vec<InventoryEvent> {
        self.receiver.try_iter().collect()
    }
}
