//! Catalog Sorting

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::products::Product;

/// Returned when a sort key name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

/// The single active ordering applied to a browse result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Featured products first
    #[default]
    Featured,

    /// Ascending price
    PriceLow,

    /// Descending price
    PriceHigh,

    /// New arrivals first, then most recently created
    Newest,

    /// Descending average rating, missing ratings counted as zero
    Rating,
}

impl SortKey {
    /// Every sort key, in menu order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
        SortKey::Rating,
    ];

    /// Name used on the command line and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
        }
    }

    /// Compare two products under this key.
    ///
    /// This is a total order: products that rank equally are ordered by identifier.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            SortKey::Featured => b.is_featured.cmp(&a.is_featured),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Newest => b
                .is_new
                .cmp(&a.is_new)
                .then_with(|| b.created_at.cmp(&a.created_at)),
            SortKey::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Sort products in place under `key`.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    products.sort_by(|a, b| key.compare(a, b));
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::test_support::product;

    use super::*;

    fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    #[test]
    fn sort_keys_parse_from_their_names() -> TestResult {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>()?, key);
        }

        assert_eq!(" Price-High ".parse::<SortKey>()?, SortKey::PriceHigh);
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(ParseSortKeyError("cheapest".to_string()))
        );

        Ok(())
    }

    #[test]
    fn price_low_is_non_decreasing_and_price_high_non_increasing() {
        let products = [
            product("a", 300),
            product("b", 120),
            product("c", 250),
            product("d", 120),
            product("e", 90),
        ];
        let mut sorted: Vec<&Product> = products.iter().collect();

        sort_products(&mut sorted, SortKey::PriceLow);
        assert!(sorted.windows(2).all(|pair| match pair {
            [a, b] => a.price <= b.price,
            _ => true,
        }));
        assert_eq!(ids(&sorted), ["e", "b", "d", "c", "a"]);

        sort_products(&mut sorted, SortKey::PriceHigh);
        assert!(sorted.windows(2).all(|pair| match pair {
            [a, b] => a.price >= b.price,
            _ => true,
        }));
        assert_eq!(ids(&sorted), ["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn featured_products_come_first_then_identifier() {
        let mut first = product("z", 100);
        first.is_featured = true;
        let mut second = product("m", 100);
        second.is_featured = true;
        let products = [product("b", 100), first, product("a", 100), second];
        let mut sorted: Vec<&Product> = products.iter().collect();

        sort_products(&mut sorted, SortKey::Featured);

        assert_eq!(ids(&sorted), ["m", "z", "a", "b"]);
    }

    #[test]
    fn newest_ranks_new_flag_then_creation_time() -> TestResult {
        let mut recent = product("recent", 100);
        recent.is_new = true;
        recent.created_at = Some("2024-03-01T00:00:00Z".parse::<Timestamp>()?);

        let mut older = product("older", 100);
        older.is_new = true;
        older.created_at = Some("2023-11-15T00:00:00Z".parse::<Timestamp>()?);

        let mut dated = product("dated", 100);
        dated.created_at = Some("2024-06-01T00:00:00Z".parse::<Timestamp>()?);

        let products = [dated, product("undated", 100), older, recent];
        let mut sorted: Vec<&Product> = products.iter().collect();

        sort_products(&mut sorted, SortKey::Newest);

        assert_eq!(ids(&sorted), ["recent", "older", "dated", "undated"]);

        Ok(())
    }

    #[test]
    fn rating_treats_missing_as_zero() {
        let mut good = product("good", 100);
        good.rating = Some(4.5);
        let mut poor = product("poor", 100);
        poor.rating = Some(0.0);
        let products = [product("unrated", 100), poor, good];
        let mut sorted: Vec<&Product> = products.iter().collect();

        sort_products(&mut sorted, SortKey::Rating);

        assert_eq!(ids(&sorted), ["good", "poor", "unrated"]);
    }

    #[test]
    fn equal_ranks_order_by_identifier() {
        let products = [product("c", 100), product("a", 100), product("b", 100)];

        for key in SortKey::ALL {
            let mut sorted: Vec<&Product> = products.iter().collect();
            sort_products(&mut sorted, key);

            assert_eq!(ids(&sorted), ["a", "b", "c"], "{key}");
        }
    }

    #[test]
    fn compare_is_antisymmetric() {
        let mut cheap = product("cheap", 50);
        cheap.price = Decimal::new(4999, 2);
        let dear = product("dear", 500);

        for key in SortKey::ALL {
            assert_eq!(key.compare(&cheap, &dear), key.compare(&dear, &cheap).reverse());
        }
    }
}
