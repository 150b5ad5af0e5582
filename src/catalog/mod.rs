//! Catalog
//!
//! The static product list and its named collections, plus the browse pipeline that filters
//! and orders it. Browsing is recomputed on every call; nothing is cached or indexed beyond the
//! identifier lookup.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    products::{Product, ProductId, ProductKey},
    tags::StringTagCollection,
};

pub mod filters;
pub mod sorting;

pub use filters::{CatalogQuery, CategoryFilter, PriceRange, PriceRangeError};
pub use sorting::{ParseSortKeyError, SortKey};

/// Catalog Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product with the same identifier is already listed
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// A named group of occasions shoppers can browse by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Lowercase collection name
    pub name: String,

    /// Occasion tags in the collection; empty means every product belongs
    pub occasions: StringTagCollection,
}

impl Collection {
    /// Create a collection.
    pub fn new(
        name: impl Into<String>,
        occasions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into().trim().to_lowercase(),
            occasions: StringTagCollection::new(occasions.into_iter().map(Into::into)),
        }
    }
}

/// Catalog
#[derive(Debug, Default)]
pub struct Catalog {
    /// Products by generated key
    products: SlotMap<ProductKey, Product>,

    /// Identifier -> key lookup
    keys: FxHashMap<ProductId, ProductKey>,

    /// Keys in insertion order
    order: Vec<ProductKey>,

    /// Collections in insertion order
    collections: Vec<Collection>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns an error if a product with the same identifier is already listed.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        if self.keys.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        if product.is_available && product.stock == 0 {
            warn!(product = %product.id, "product is flagged available but has no stock");
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.keys.insert(id, key);
        self.order.push(key);

        Ok(key)
    }

    /// Add a collection, replacing any collection with the same name.
    pub fn add_collection(&mut self, collection: Collection) {
        match self
            .collections
            .iter_mut()
            .find(|existing| existing.name == collection.name)
        {
            Some(existing) => *existing = collection,
            None => self.collections.push(collection),
        }
    }

    /// Look up a product by identifier.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.keys
            .get(id)
            .and_then(|key| self.products.get(*key))
    }

    /// Look up a product by key.
    pub fn by_key(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Look up a collection by name, ignoring case.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        let name = name.trim();

        self.collections
            .iter()
            .find(|collection| collection.name.eq_ignore_ascii_case(name))
    }

    /// Collections in the order they were added.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Products in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Filter and order the products for display.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut products = filters::filter(self.iter(), query);
        sorting::sort_products(&mut products, query.sort);

        debug!(
            matched = products.len(),
            total = self.len(),
            sort = %query.sort,
            "browsed catalog"
        );

        products
    }
}
