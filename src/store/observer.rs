//! Synchronous change notification, shared by all stores.
//!
//! Replaces the implicit re-render subscriptions of a UI framework with an
//! explicit subscribe/unsubscribe surface. Listeners run synchronously after
//! each successful mutation, in subscription order, so observers see
//! mutations in exactly the order they were issued.

use std::fmt;

/// Handle returned by `subscribe`; pass back to `unsubscribe` to stop
/// deliveries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Subscribers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn Fn(&E)>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> Subscribers<E> {
    pub fn subscribe(&mut self, listener: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was already unsubscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(entry, _)| *entry != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
