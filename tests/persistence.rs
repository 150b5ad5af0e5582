//! Integration tests for persisting the stores to disk.
//!
//! Each store writes a versioned envelope (`{"state": ..., "version": 1}`) to
//! `<data dir>/<key>.json` after every change and reads it back once when loaded.

use std::fs;

use rust_decimal::Decimal;
use serde_json::{Value, json};
use testresult::TestResult;

use souk::{
    cart::{CART_STORAGE_KEY, CartStore},
    fixtures,
    products::Size,
    storage::{FileStorage, KeyValueStorage, MemoryStorage},
    wishlist::{WISHLIST_STORAGE_KEY, WishlistStore},
};

#[test]
fn fresh_stores_restore_from_disk() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = fixtures::default_catalog()?;
    let ivory = catalog.get("ivory-caftan").ok_or("missing product")?;
    let medina = catalog.get("medina-jellaba").ok_or("missing product")?;

    {
        let storage = FileStorage::open(dir.path())?;
        let mut cart = CartStore::load(&storage);
        let mut wishlist = WishlistStore::load(&storage);

        cart.add_item(ivory, "ivory", Size::L, 2);
        cart.add_item(medina, "white", Size::M, 1);
        wishlist.add_item(medina);
    }

    let storage = FileStorage::open(dir.path())?;
    let cart = CartStore::load(&storage);
    let wishlist = WishlistStore::load(&storage);

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Decimal::from(640));
    assert!(wishlist.is_in_wishlist(&medina.id));
    assert_eq!(wishlist.len(), 1);

    Ok(())
}

#[test]
fn snapshots_are_versioned_envelopes() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = fixtures::default_catalog()?;
    let storage = FileStorage::open(dir.path())?;
    let mut cart = CartStore::load(&storage);

    cart.add_item(
        catalog.get("atlas-jellaba").ok_or("missing product")?,
        "beige",
        Size::S,
        1,
    );

    let raw = fs::read_to_string(dir.path().join(format!("{CART_STORAGE_KEY}.json")))?;
    let value: Value = serde_json::from_str(&raw)?;

    assert_eq!(value["version"], 1);
    assert_eq!(value["state"]["totalItems"], 1);
    assert_eq!(value["state"]["items"][0]["id"], "atlas-jellaba-beige-s");

    Ok(())
}

#[test]
fn legacy_cart_object_is_migrated() -> TestResult {
    let storage = MemoryStorage::new();
    storage.set(
        CART_STORAGE_KEY,
        &json!({
            "items": [{
                "id": "pearl-caftan-white-m",
                "productId": "pearl-caftan",
                "name": "Pearl Caftan",
                "price": "200.00",
                "image": "/images/pearl-caftan-1.jpg",
                "color": "white",
                "size": "m",
                "quantity": 2
            }],
            "totalItems": 5,
            "totalPrice": "1000.00"
        })
        .to_string(),
    )?;

    let cart = CartStore::load(&storage);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.total_items(), 2, "drifted totals are recomputed");
    assert_eq!(cart.total_price(), Decimal::from(400));

    Ok(())
}

#[test]
fn unreadable_snapshots_start_empty() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join(format!("{CART_STORAGE_KEY}.json")), "{ not json")?;
    fs::write(
        dir.path().join(format!("{WISHLIST_STORAGE_KEY}.json")),
        r#"{"state":{"items":[]},"version":99}"#,
    )?;

    let storage = FileStorage::open(dir.path())?;

    assert!(CartStore::load(&storage).is_empty());
    assert!(WishlistStore::load(&storage).is_empty());

    Ok(())
}

#[test]
fn full_storage_keeps_in_memory_state() -> TestResult {
    let catalog = fixtures::default_catalog()?;
    let storage = MemoryStorage::with_quota(64);
    let mut cart = CartStore::load(&storage);

    cart.add_item(
        catalog.get("royal-takchita").ok_or("missing product")?,
        "red",
        Size::M,
        1,
    );

    assert_eq!(cart.total_items(), 1);
    assert!(storage.get(CART_STORAGE_KEY)?.is_none());
    assert!(CartStore::load(&storage).is_empty());

    Ok(())
}
