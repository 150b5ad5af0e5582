//! Souk
//!
//! Souk is the client-side state core of a traditional-clothing storefront: a persisted
//! shopping cart, a persisted wishlist and a catalog filter/sort pipeline over a static
//! product list.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod subscribers;
pub mod tags;
pub mod wishlist;
