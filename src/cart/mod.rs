//! Cart
//!
//! The cart store owns the shopper's line items, keeps the running totals in step with them
//! and mirrors the whole state to local storage after every mutation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    products::{Product, Size},
    storage::{KeyValueStorage, snapshot},
    subscribers::{SubscriptionKey, Subscribers},
};

pub mod items;
pub mod state;

pub use items::{CartItem, LineItemId};
pub use state::CartState;

/// Storage key the cart snapshot is written under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Largest quantity selectable for a single line in quantity controls.
///
/// The store itself does not enforce this; callers clamp input with [`clamp_quantity`].
pub const MAX_LINE_QUANTITY: u32 = 10;

/// Clamp a requested quantity into `1..=MAX_LINE_QUANTITY`.
pub fn clamp_quantity(quantity: i64) -> u32 {
    let clamped = quantity.clamp(1, i64::from(MAX_LINE_QUANTITY));

    u32::try_from(clamped).unwrap_or(MAX_LINE_QUANTITY)
}

/// Cart Store
///
/// Operations never fail from the caller's point of view: unknown identifiers are no-ops and
/// storage failures are logged and swallowed.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    state: CartState,
    subscribers: Subscribers<CartState>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a cart, rehydrating it from the snapshot in `storage` if one is readable.
    pub fn load(storage: S) -> Self {
        let mut state = match snapshot::read::<CartState, _>(&storage, CART_STORAGE_KEY) {
            Ok(state) => state.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "failed to restore cart, starting empty");
                CartState::default()
            }
        };

        if state.reconcile() {
            warn!(
                total_items = state.total_items,
                total_price = %state.total_price,
                "restored cart totals did not match its items, recomputed"
            );
        }

        debug!(items = state.items.len(), "cart loaded");

        Self {
            storage,
            state,
            subscribers: Subscribers::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items, in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// Find a line item by identifier.
    pub fn item(&self, id: &LineItemId) -> Option<&CartItem> {
        self.state.item(id)
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.state.total_items
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total_price(&self) -> Decimal {
        self.state.total_price
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add `quantity` units of a product variant.
    ///
    /// Adding a variant already in the cart increases its quantity; otherwise a new line is
    /// created from a snapshot of the product. Neither stock nor [`MAX_LINE_QUANTITY`] is
    /// checked. A zero quantity changes nothing.
    pub fn add_item(
        &mut self,
        product: &Product,
        color: &str,
        size: Size,
        quantity: u32,
    ) -> LineItemId {
        let id = LineItemId::new(&product.id, color, size);

        if quantity == 0 {
            debug!(item = %id, "ignoring add with zero quantity");
            return id;
        }

        // Existing lines are charged at their snapshot price so totals stay equal to the sum
        // over lines.
        let current = self.state.item(&id);
        let unit_price = current.map_or(product.price, |item| item.price);
        let line_quantity =
            current.map_or(Some(quantity), |item| item.quantity.checked_add(quantity));
        let total_price = unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(|cost| self.state.total_price.checked_add(cost));

        let (Some(line_quantity), Some(total_price)) = (line_quantity, total_price) else {
            warn!(item = %id, quantity, "cart line out of range, add ignored");
            return id;
        };

        match self.state.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantity = line_quantity,
            None => self
                .state
                .items
                .push(CartItem::from_product(product, color, size, quantity)),
        }

        self.state.total_items = self.state.total_items.saturating_add(quantity);
        self.state.total_price = total_price;

        debug!(item = %id, quantity, "added to cart");
        self.commit();

        id
    }

    /// Remove a line item. Unknown identifiers are ignored.
    pub fn remove_item(&mut self, id: &LineItemId) {
        let Some(index) = self.state.position(id) else {
            debug!(item = %id, "remove of unknown cart item ignored");
            return;
        };

        self.state.items.remove(index);

        // A saturated item count cannot be decremented exactly.
        self.state.reconcile();

        debug!(item = %id, "removed from cart");
        self.commit();
    }

    /// Set the quantity of a line item.
    ///
    /// A quantity of zero or less removes the line. Unknown identifiers are ignored.
    pub fn update_item_quantity(&mut self, id: &LineItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(item) = self.state.items.iter_mut().find(|item| &item.id == id) else {
            debug!(item = %id, "update of unknown cart item ignored");
            return;
        };

        let previous = item.quantity;
        let line_total = item.price.checked_mul(Decimal::from(quantity));
        let total_price = line_total.and_then(|line_total| {
            self.state
                .total_price
                .checked_sub(item.line_total())
                .and_then(|rest| rest.checked_add(line_total))
        });

        if total_price.is_none() {
            warn!(item = %id, quantity, "cart line out of range, update ignored");
            return;
        }

        item.quantity = quantity;
        self.state.reconcile();

        debug!(item = %id, previous, quantity, "updated cart quantity");
        self.commit();
    }

    /// Remove every line and reset the totals.
    pub fn clear_cart(&mut self) {
        self.state = CartState::default();

        debug!("cleared cart");
        self.commit();
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionKey {
        self.subscribers.subscribe(listener)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    fn commit(&mut self) {
        debug_assert!(
            self.state.is_consistent(),
            "cart totals drifted from line items"
        );

        if let Err(error) = snapshot::write(&self.storage, CART_STORAGE_KEY, &self.state) {
            warn!(%error, "failed to persist cart");
        }

        self.subscribers.notify(&self.state);
    }
}
