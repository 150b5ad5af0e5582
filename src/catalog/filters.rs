//! Catalog Filters
//!
//! Every active criterion of a [`CatalogQuery`] must hold for a product to be listed.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::{Collection, sorting::SortKey},
    products::{Category, ParseCategoryError, Product},
    tags::{SizeSet, StringTagCollection, TagCollection},
};

/// Category selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Check a category against the selection.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        s.parse().map(CategoryFilter::Only)
    }
}

/// Price Range Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceRangeError {
    /// Neither `min-max` nor `min+`
    #[error("price range must look like `min-max` or `min+`, got {0:?}")]
    Malformed(String),

    /// A bound is not a decimal number
    #[error("invalid price bound {bound:?}: {reason}")]
    InvalidBound {
        /// Bound as written
        bound: String,

        /// Why it could not be parsed
        reason: String,
    },

    /// A bound is below zero
    #[error("price bound must not be negative: {0}")]
    Negative(Decimal),

    /// The lower bound is above the upper bound
    #[error("price range minimum {min} is above maximum {max}")]
    Inverted {
        /// Lower bound
        min: Decimal,

        /// Upper bound
        max: Decimal,
    },
}

/// Inclusive price range, optionally open ended above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceRange {
    min: Decimal,
    max: Option<Decimal>,
}

impl PriceRange {
    /// Create a closed range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or `min` is above `max`.
    pub fn between(min: Decimal, max: Decimal) -> Result<Self, PriceRangeError> {
        let min = non_negative(min)?;
        let max = non_negative(max)?;

        if min > max {
            return Err(PriceRangeError::Inverted { min, max });
        }

        Ok(Self {
            min,
            max: Some(max),
        })
    }

    /// Create an open ended range `[min, ∞)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is negative.
    pub fn at_least(min: Decimal) -> Result<Self, PriceRangeError> {
        Ok(Self {
            min: non_negative(min)?,
            max: None,
        })
    }

    /// Lower bound.
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound, if the range is closed.
    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    /// Check if a price falls inside the range. Both bounds are inclusive.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

fn non_negative(bound: Decimal) -> Result<Decimal, PriceRangeError> {
    if bound.is_sign_negative() && !bound.is_zero() {
        return Err(PriceRangeError::Negative(bound));
    }

    Ok(bound)
}

fn parse_bound(bound: &str) -> Result<Decimal, PriceRangeError> {
    let bound = bound.trim();

    Decimal::from_str(bound).map_err(|error| PriceRangeError::InvalidBound {
        bound: bound.to_string(),
        reason: error.to_string(),
    })
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{max}", self.min),
            None => write!(f, "{}+", self.min),
        }
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(min) = trimmed.strip_suffix('+') {
            return Self::at_least(parse_bound(min)?);
        }

        match trimmed.split_once('-') {
            Some((min, max)) => Self::between(parse_bound(min)?, parse_bound(max)?),
            None => Err(PriceRangeError::Malformed(s.to_string())),
        }
    }
}

/// Browse criteria plus the ordering to apply.
///
/// The default query lists everything, featured first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    /// Category selection
    pub category: CategoryFilter,

    /// Occasions of the selected collection; empty when no collection constrains the result
    pub occasions: StringTagCollection,

    /// Price range, if any
    pub price: Option<PriceRange>,

    /// Selected sizes; empty selects every size
    pub sizes: SizeSet,

    /// Selected colors; empty selects every color
    pub colors: StringTagCollection,

    /// Only list products that can be bought right now
    pub available_only: bool,

    /// Ordering
    pub sort: SortKey,
}

impl CatalogQuery {
    /// A query that lists everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Restrict to a collection's occasions.
    #[must_use]
    pub fn collection(mut self, collection: &Collection) -> Self {
        self.occasions = collection.occasions.clone();
        self
    }

    /// Restrict to a price range.
    #[must_use]
    pub fn price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// Restrict to products offered in at least one of `sizes`.
    #[must_use]
    pub fn sizes(mut self, sizes: impl Into<SizeSet>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Restrict to products offered in at least one of `colors`.
    #[must_use]
    pub fn colors(mut self, colors: StringTagCollection) -> Self {
        self.colors = colors;
        self
    }

    /// Only list products that are available and in stock.
    #[must_use]
    pub fn available_only(mut self, available_only: bool) -> Self {
        self.available_only = available_only;
        self
    }

    /// Set the ordering.
    #[must_use]
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Check a product against every active criterion.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category)
            && product.occasions.satisfies(&self.occasions)
            && self
                .price
                .is_none_or(|range| range.contains(product.price))
            && product.sizes.satisfies(&self.sizes)
            && product.colors.satisfies(&self.colors)
            && (!self.available_only || product.in_stock())
    }
}

/// Keep the products matching `query`, in their original order.
pub fn filter<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    query: &CatalogQuery,
) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|product| query.matches(product))
        .collect()
}
