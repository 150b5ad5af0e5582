//! Cart State

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cart::items::{CartItem, LineItemId},
    storage::{SnapshotError, Versioned},
};

/// Cart line items plus running totals.
///
/// `total_items` and `total_price` always equal the saturating sums over `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Line items, in the order they were first added
    pub items: Vec<CartItem>,

    /// Sum of quantities
    #[serde(default)]
    pub total_items: u32,

    /// Sum of unit price times quantity
    #[serde(default)]
    pub total_price: Decimal,
}

impl CartState {
    /// Find a line item by identifier.
    pub fn item(&self, id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn position(&self, id: &LineItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Totals recomputed from the line items.
    pub fn recomputed_totals(&self) -> (u32, Decimal) {
        self.items
            .iter()
            .fold((0u32, Decimal::ZERO), |(count, price), item| {
                (
                    count.saturating_add(item.quantity),
                    price.saturating_add(item.line_total()),
                )
            })
    }

    /// Check that the running totals match the line items.
    pub fn is_consistent(&self) -> bool {
        self.recomputed_totals() == (self.total_items, self.total_price)
    }

    /// Reset the running totals from the line items. Returns true if they changed.
    pub(crate) fn reconcile(&mut self) -> bool {
        let (total_items, total_price) = self.recomputed_totals();
        let changed = total_items != self.total_items || total_price != self.total_price;

        self.total_items = total_items;
        self.total_price = total_price;

        changed
    }
}

impl Versioned for CartState {
    const VERSION: u32 = 1;

    fn migrate(version: u32, state: Value) -> Result<Self, SnapshotError> {
        match version {
            // Version 0 is the bare `{ items, totalItems, totalPrice }` object written before
            // snapshots carried an envelope. The layout is unchanged.
            0 | 1 => Ok(serde_json::from_value(state)?),
            found => Err(SnapshotError::UnsupportedVersion {
                found: u64::from(found),
                current: Self::VERSION,
            }),
        }
    }
}
