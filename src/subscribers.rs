//! Subscribers
//!
//! Change listeners registered against a store. Listeners run synchronously
//! after every mutation that changed the store's state.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe.
    pub struct SubscriptionKey;
}

type Listener<T> = Box<dyn FnMut(&T)>;

/// Listeners for changes to a `T`.
pub struct Subscribers<T> {
    listeners: SlotMap<SubscriptionKey, Listener<T>>,
}

impl<T> Subscribers<T> {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionKey {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.listeners.remove(key).is_some()
    }

    /// Call every listener with the new state.
    pub fn notify(&mut self, state: &T) {
        for listener in self.listeners.values_mut() {
            listener(state);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
