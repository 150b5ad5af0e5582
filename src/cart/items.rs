//! Cart Items

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId, Size};

/// Composite line item identifier built from product id, color and size.
///
/// The same product in two colors or two sizes makes two distinct line items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Build the identifier for a product variant.
    pub fn new(product: &ProductId, color: &str, size: Size) -> Self {
        Self(format!("{product}-{color}-{size}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A product variant in the cart.
///
/// Name, price and image are copied from the product when the line is created and are not
/// refreshed if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Composite identifier
    pub id: LineItemId,

    /// Product the line was created from
    pub product_id: ProductId,

    /// Product name at time of add
    pub name: String,

    /// Unit price at time of add
    pub price: Decimal,

    /// Primary image at time of add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Selected color
    pub color: String,

    /// Selected size
    pub size: Size,

    /// Units of this variant
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot `product` as a new line item.
    pub fn from_product(product: &Product, color: &str, size: Size, quantity: u32) -> Self {
        Self {
            id: LineItemId::new(&product.id, color, size),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().map(ToString::to_string),
            color: color.to_string(),
            size,
            quantity,
        }
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}
