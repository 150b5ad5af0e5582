//! Souk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartItem, CartState, CartStore, LineItemId},
    catalog::{
        Catalog, CatalogError, CatalogQuery, CategoryFilter, Collection, PriceRange,
        PriceRangeError, SortKey,
    },
    fixtures::{Fixture, FixtureError, default_catalog, parse_catalog},
    products::{Category, Product, ProductId, ProductKey, Size},
    storage::{
        FileStorage, KeyValueStorage, MemoryStorage, Persisted, SnapshotError, StorageError,
        Versioned,
    },
    subscribers::SubscriptionKey,
    tags::{SizeSet, StringTagCollection, TagCollection},
    wishlist::{WISHLIST_STORAGE_KEY, WishlistState, WishlistStore},
};
