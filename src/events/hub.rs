//! Event hub for logging and broadcasting inventory events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, InventoryEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<InventoryEvent>,
}

impl Subscription {
    /// `false` once the subscriber is full or gone.
    fn deliver(&self, event: InventoryEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    /// Last word to a subscriber being removed. Ignored if it cannot fit.
    fn farewell(self, reason: DropReason) {
        let _ = self.sender.try_send(InventoryEvent::Dropped { reason });
    }
}

/// Logs events and fans them out to subscribers.
pub struct EventHub {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    next_id: AtomicU64,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a subscriber with its own bounded buffer.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let removed = self.subscriptions.write().remove(&id);
        if let Some(sub) = removed {
            sub.farewell(DropReason::Unsubscribed);
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Log an event and broadcast it to matching subscriptions.
    pub fn report(&self, event: InventoryEvent) {
        event.log();
        self.broadcast(event);
    }

    fn broadcast(&self, event: InventoryEvent) {
        let stalled: Vec<SubscriptionId> = self
            .subscriptions
            .read()
            .iter()
            .filter(|(_, sub)| sub.config.filter.matches(&event))
            .filter(|(_, sub)| !sub.deliver(event.clone()))
            .map(|(id, _)| *id)
            .collect();

        if stalled.is_empty() {
            return;
        }

        let mut subs = self.subscriptions.write();
        for id in stalled {
            if let Some(sub) = subs.remove(&id) {
                sub.farewell(DropReason::BufferOverflow);
            }
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
