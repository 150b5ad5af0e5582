//! Product Fixtures

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    catalog::Collection,
    fixtures::FixtureError,
    products::{Category, Product, ProductId},
    tags::{SizeSet, StringTagCollection},
};

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products, in listing order
    #[serde(default)]
    pub products: Vec<ProductFixture>,

    /// Named collections
    #[serde(default)]
    pub collections: Vec<CollectionFixture>,
}

/// Collection fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CollectionFixture {
    /// Collection name
    pub name: String,

    /// Occasion tags
    #[serde(default)]
    pub occasions: Vec<String>,
}

impl From<CollectionFixture> for Collection {
    fn from(fixture: CollectionFixture) -> Self {
        Collection::new(fixture.name, fixture.occasions)
    }
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Description text
    #[serde(default)]
    pub description: String,

    /// Price as a decimal string (e.g., "180.00")
    pub price: String,

    /// Previous price as a decimal string
    #[serde(default)]
    pub old_price: Option<String>,

    /// Category
    pub category: Category,

    /// Image references, primary first
    #[serde(default)]
    pub images: Vec<String>,

    /// Sizes on offer
    #[serde(default)]
    pub sizes: SizeSet,

    /// Color identifiers
    #[serde(default)]
    pub colors: Vec<String>,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Availability flag
    #[serde(default)]
    pub is_available: bool,

    /// Featured flag
    #[serde(default)]
    pub is_featured: bool,

    /// New arrival flag
    #[serde(default)]
    pub is_new: bool,

    /// Material description
    #[serde(default)]
    pub material: Option<String>,

    /// Occasion tags
    #[serde(default)]
    pub occasions: Vec<String>,

    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: Option<f32>,

    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let id = fixture.id.trim();

        if id.is_empty() {
            return Err(FixtureError::InvalidProduct {
                id: fixture.id,
                reason: "identifier is empty".to_string(),
            });
        }

        let price = parse_price(id, &fixture.price)?;
        let old_price = fixture
            .old_price
            .as_deref()
            .map(|old_price| parse_price(id, old_price))
            .transpose()?;

        if let Some(rating) = fixture
            .rating
            .filter(|rating| !(0.0..=5.0).contains(rating))
        {
            return Err(FixtureError::InvalidProduct {
                id: id.to_string(),
                reason: format!("rating {rating} is outside 0 to 5"),
            });
        }

        Ok(Product {
            id: ProductId::new(id),
            name: fixture.name,
            description: fixture.description,
            price,
            old_price,
            category: fixture.category,
            images: fixture.images,
            sizes: fixture.sizes,
            colors: StringTagCollection::new(fixture.colors),
            stock: fixture.stock,
            is_available: fixture.is_available,
            is_featured: fixture.is_featured,
            is_new: fixture.is_new,
            material: fixture.material,
            occasions: StringTagCollection::new(fixture.occasions),
            rating: fixture.rating,
            created_at: fixture.created_at,
        })
    }
}

/// Parse a non-negative decimal price string.
///
/// # Errors
///
/// Returns an error if the string is not a decimal number or is negative.
pub fn parse_price(id: &str, price: &str) -> Result<Decimal, FixtureError> {
    let parsed = Decimal::from_str(price.trim()).map_err(|error| FixtureError::InvalidPrice {
        id: id.to_string(),
        price: price.to_string(),
        reason: error.to_string(),
    })?;

    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(FixtureError::InvalidPrice {
            id: id.to_string(),
            price: price.to_string(),
            reason: "prices must not be negative".to_string(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{products::Size, tags::TagCollection};

    use super::*;

    const PRODUCT: &str = r#"
id: emerald-caftan
name: Emerald Caftan
price: "180.00"
old_price: "220.00"
category: caftan
sizes: [s, m]
colors: [Emerald, gold]
stock: 4
is_available: true
occasions: [wedding]
rating: 4.8
created_at: "2024-01-10T09:00:00Z"
"#;

    #[test]
    fn product_fixture_converts() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(PRODUCT)?;
        let product = Product::try_from(fixture)?;

        assert_eq!(product.id.as_str(), "emerald-caftan");
        assert_eq!(product.price, Decimal::new(18000, 2));
        assert_eq!(product.old_price, Some(Decimal::from(220)));
        assert_eq!(product.category, Category::Caftan);
        assert!(product.sizes.contains(&Size::M));
        assert!(!product.sizes.contains(&Size::L));
        assert!(product.colors.contains("emerald"));
        assert!(product.in_stock());
        assert!(!product.is_featured);
        assert!(product.created_at.is_some());

        Ok(())
    }

    #[test]
    fn negative_prices_are_rejected() -> TestResult {
        let fixture: ProductFixture =
            serde_norway::from_str(&PRODUCT.replace("\"180.00\"", "\"-1\""))?;

        let result = Product::try_from(fixture);

        assert!(
            matches!(result, Err(FixtureError::InvalidPrice { ref price, .. }) if price == "-1"),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn unparseable_old_price_is_rejected() -> TestResult {
        let fixture: ProductFixture =
            serde_norway::from_str(&PRODUCT.replace("\"220.00\"", "\"lots\""))?;

        assert!(matches!(
            Product::try_from(fixture),
            Err(FixtureError::InvalidPrice { .. })
        ));

        Ok(())
    }

    #[test]
    fn out_of_range_rating_is_rejected() -> TestResult {
        let fixture: ProductFixture =
            serde_norway::from_str(&PRODUCT.replace("rating: 4.8", "rating: 7"))?;

        assert!(matches!(
            Product::try_from(fixture),
            Err(FixtureError::InvalidProduct { .. })
        ));

        Ok(())
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let result =
            serde_norway::from_str::<ProductFixture>(&PRODUCT.replace("caftan", "burnous"));

        assert!(result.is_err());
    }
}
