//! Products
//!
//! The read-only product record shared by the catalog, cart and wishlist.

use std::{borrow::Borrow, fmt, str::FromStr};

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

use crate::tags::{sizes::SizeSet, string::StringTagCollection};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Returned when a category name is not part of the fixed range.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Caftan
    Caftan,

    /// Jellaba
    Jellaba,

    /// Takchita
    Takchita,

    /// Gandoura
    Gandoura,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Caftan,
        Category::Jellaba,
        Category::Takchita,
        Category::Gandoura,
    ];

    /// Lowercase category name, as used in storage and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Caftan => "caftan",
            Category::Jellaba => "jellaba",
            Category::Takchita => "takchita",
            Category::Gandoura => "gandoura",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Returned when a size label is not part of the fixed range.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown size: {0}")]
pub struct ParseSizeError(pub String);

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Extra small
    Xs,

    /// Small
    S,

    /// Medium
    M,

    /// Large
    L,

    /// Extra large
    Xl,

    /// Double extra large
    Xxl,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    /// Lowercase size label.
    pub fn as_str(self) -> &'static str {
        match self {
            Size::Xs => "xs",
            Size::S => "s",
            Size::M => "m",
            Size::L => "l",
            Size::Xl => "xl",
            Size::Xxl => "xxl",
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Size::Xs => 1,
            Size::S => 1 << 1,
            Size::M => 1 << 2,
            Size::L => 1 << 3,
            Size::Xl => 1 << 4,
            Size::Xxl => 1 << 5,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseSizeError(s.to_string()))
    }
}

/// Product
///
/// Field names serialize in camel case so persisted wishlist entries keep the same layout as
/// the storefront's product records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Description text
    #[serde(default)]
    pub description: String,

    /// Current price
    pub price: Decimal,

    /// Previous price, shown struck through when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,

    /// Category
    pub category: Category,

    /// Ordered image references, primary image first
    #[serde(default)]
    pub images: Vec<String>,

    /// Sizes the product is offered in
    #[serde(default)]
    pub sizes: SizeSet,

    /// Color identifiers
    #[serde(default)]
    pub colors: StringTagCollection,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Availability flag, independent of `stock`
    #[serde(default)]
    pub is_available: bool,

    /// Featured flag
    #[serde(default)]
    pub is_featured: bool,

    /// New arrival flag
    #[serde(default)]
    pub is_new: bool,

    /// Material description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Occasion tags
    #[serde(default)]
    pub occasions: StringTagCollection,

    /// Average rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Product {
    /// The first image reference, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// True when the product is flagged available and has units left.
    pub fn in_stock(&self) -> bool {
        self.is_available && self.stock > 0
    }

    /// Average rating, treating a missing rating as zero.
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }

    /// Fraction taken off the old price, if the product is discounted.
    pub fn discount(&self) -> Option<Percentage> {
        let old_price = self.old_price?;

        if old_price <= self.price || old_price.is_zero() {
            return None;
        }

        Some(Percentage::from((old_price - self.price) / old_price))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A minimal available caftan, for tests to adjust.
    pub(crate) fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            old_price: None,
            category: Category::Caftan,
            images: vec![format!("/images/{id}.jpg")],
            sizes: SizeSet::from([Size::S, Size::M, Size::L]),
            colors: StringTagCollection::from_strs(&["red"]),
            stock: 5,
            is_available: true,
            is_featured: false,
            is_new: false,
            material: None,
            occasions: StringTagCollection::default(),
            rating: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{test_support::product, *};

    #[test]
    fn category_parses_case_insensitively() -> TestResult {
        assert_eq!("Caftan".parse::<Category>()?, Category::Caftan);
        assert_eq!(" jellaba ".parse::<Category>()?, Category::Jellaba);
        assert_eq!(
            "burnous".parse::<Category>(),
            Err(ParseCategoryError("burnous".to_string()))
        );

        Ok(())
    }

    #[test]
    fn size_parses_and_displays() -> TestResult {
        assert_eq!("XL".parse::<Size>()?, Size::Xl);
        assert_eq!(Size::Xxl.to_string(), "xxl");
        assert!("xxxl".parse::<Size>().is_err());

        Ok(())
    }

    #[test]
    fn size_bits_are_distinct() {
        let combined = Size::ALL.into_iter().fold(0u8, |acc, size| {
            assert_eq!(acc & size.bit(), 0, "{size} shares a bit");
            acc | size.bit()
        });

        assert_eq!(combined.count_ones(), 6);
    }

    #[test]
    fn discount_is_relative_to_old_price() {
        let mut caftan = product("c1", 150);
        caftan.old_price = Some(Decimal::from(200));

        let discount = caftan.discount().map(|pct| pct * Decimal::ONE);

        assert_eq!(discount, Some(Decimal::new(25, 2)));
    }

    #[test]
    fn discount_ignores_old_price_not_above_price() {
        let mut caftan = product("c1", 150);
        assert!(caftan.discount().is_none());

        caftan.old_price = Some(Decimal::from(150));
        assert!(caftan.discount().is_none());
    }

    #[test]
    fn in_stock_needs_availability_and_units() {
        let mut caftan = product("c1", 150);
        assert!(caftan.in_stock());

        caftan.stock = 0;
        assert!(!caftan.in_stock());

        caftan.stock = 3;
        caftan.is_available = false;
        assert!(!caftan.in_stock());
    }

    #[test]
    fn product_serializes_with_camel_case_fields() -> TestResult {
        let mut caftan = product("c1", 150);
        caftan.is_new = true;

        let json = serde_json::to_value(&caftan)?;

        assert_eq!(json["id"], "c1");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["isAvailable"], true);
        assert!(json.get("oldPrice").is_none());

        let parsed: Product = serde_json::from_value(json)?;
        assert_eq!(parsed, caftan);

        Ok(())
    }
}
