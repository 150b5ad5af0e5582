//! Wishlist
//!
//! Liked products, deduplicated by product identifier. Persistence goes through the generic
//! [`Persisted`] wrapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    products::{Product, ProductId},
    storage::{KeyValueStorage, Persisted, SnapshotError, Versioned},
    subscribers::{SubscriptionKey, Subscribers},
};

/// Storage key the wishlist snapshot is written under.
pub const WISHLIST_STORAGE_KEY: &str = "wishlist-storage";

/// Persisted wishlist contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistState {
    /// Full product records, in the order they were liked
    pub items: Vec<Product>,
}

impl WishlistState {
    /// Check if a product is in the wishlist.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|product| &product.id == id)
    }
}

impl Versioned for WishlistState {
    const VERSION: u32 = 1;

    fn migrate(version: u32, state: Value) -> Result<Self, SnapshotError> {
        match version {
            // Version 0 envelopes were written without an explicit version; the layout matches.
            0 | 1 => {
                let mut state: WishlistState = serde_json::from_value(state)?;
                dedup_by_id(&mut state.items);

                Ok(state)
            }
            found => Err(SnapshotError::UnsupportedVersion {
                found: u64::from(found),
                current: Self::VERSION,
            }),
        }
    }
}

fn dedup_by_id(items: &mut Vec<Product>) {
    let mut seen: Vec<ProductId> = Vec::with_capacity(items.len());

    items.retain(|product| {
        if seen.contains(&product.id) {
            false
        } else {
            seen.push(product.id.clone());
            true
        }
    });
}

/// Wishlist Store
#[derive(Debug)]
pub struct WishlistStore<S> {
    persisted: Persisted<S, WishlistState>,
    subscribers: Subscribers<WishlistState>,
}

impl<S: KeyValueStorage> WishlistStore<S> {
    /// Create a wishlist, rehydrating it from `storage` if a readable snapshot exists.
    pub fn load(storage: S) -> Self {
        Self {
            persisted: Persisted::load(storage, WISHLIST_STORAGE_KEY),
            subscribers: Subscribers::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &WishlistState {
        self.persisted.state()
    }

    /// Liked products, in the order they were added.
    pub fn items(&self) -> &[Product] {
        &self.persisted.state().items
    }

    /// Number of liked products.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Check if nothing is liked.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Check if a product is in the wishlist.
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.persisted.state().contains(id)
    }

    /// Like a product. Returns false if a product with the same identifier is already present.
    pub fn add_item(&mut self, product: &Product) -> bool {
        if self.is_in_wishlist(&product.id) {
            debug!(product = %product.id, "already in wishlist");
            return false;
        }

        self.persisted
            .update(|state| state.items.push(product.clone()));

        debug!(product = %product.id, "added to wishlist");
        self.notify();

        true
    }

    /// Unlike a product. Returns false if it was not in the wishlist.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        if !self.is_in_wishlist(id) {
            return false;
        }

        self.persisted
            .update(|state| state.items.retain(|product| &product.id != id));

        debug!(product = %id, "removed from wishlist");
        self.notify();

        true
    }

    /// Remove every product.
    pub fn clear_wishlist(&mut self) {
        self.persisted.update(|state| state.items.clear());

        debug!("cleared wishlist");
        self.notify();
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&WishlistState) + 'static,
    ) -> SubscriptionKey {
        self.subscribers.subscribe(listener)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    fn notify(&mut self) {
        self.subscribers.notify(self.persisted.state());
    }
}
