//! Integration tests for the cart and wishlist stores over the bundled catalog.

use std::rc::Rc;

use rust_decimal::Decimal;
use testresult::TestResult;

use souk::{
    cart::{CartStore, LineItemId},
    catalog::Catalog,
    fixtures,
    products::{Product, Size},
    storage::MemoryStorage,
    wishlist::WishlistStore,
};

fn product<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Product, String> {
    catalog.get(id).ok_or_else(|| format!("missing product {id}"))
}

#[test]
fn shopping_session_keeps_totals_in_step() -> TestResult {
    let catalog = fixtures::default_catalog()?;
    let storage = MemoryStorage::new();
    let mut cart = CartStore::load(&storage);

    let emerald = product(&catalog, "emerald-caftan")?;
    let atlas = product(&catalog, "atlas-jellaba")?;

    let caftan_line = cart.add_item(emerald, "gold", Size::M, 2);
    cart.add_item(emerald, "gold", Size::M, 3);
    let jellaba_line = cart.add_item(atlas, "brown", Size::L, 1);
    cart.add_item(atlas, "brown", Size::Xl, 1);

    assert_eq!(cart.items().len(), 3);
    assert_eq!(cart.item(&caftan_line).map(|item| item.quantity), Some(5));
    assert_eq!(cart.total_items(), 7);
    assert_eq!(cart.total_price(), Decimal::new(109_000, 2));
    assert!(cart.state().is_consistent());

    cart.update_item_quantity(&jellaba_line, 4);
    assert_eq!(cart.total_items(), 10);
    assert_eq!(cart.total_price(), Decimal::new(137_500, 2));

    cart.update_item_quantity(&caftan_line, -1);
    assert!(cart.item(&caftan_line).is_none());
    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.total_price(), Decimal::new(47_500, 2));
    assert!(cart.state().is_consistent());

    cart.remove_item(&LineItemId::from("no-such-line"));
    assert_eq!(cart.total_items(), 5);

    Ok(())
}

#[test]
fn line_ids_combine_product_color_and_size() -> TestResult {
    let catalog = fixtures::default_catalog()?;
    let storage = MemoryStorage::new();
    let mut cart = CartStore::load(&storage);

    let id = cart.add_item(product(&catalog, "royal-takchita")?, "red", Size::S, 1);

    assert_eq!(id.as_str(), "royal-takchita-red-s");

    Ok(())
}

#[test]
fn cart_and_wishlist_share_one_storage() -> TestResult {
    let catalog = fixtures::default_catalog()?;
    let storage = Rc::new(MemoryStorage::new());

    let mut cart = CartStore::load(Rc::clone(&storage));
    let mut wishlist = WishlistStore::load(Rc::clone(&storage));

    let pearl = product(&catalog, "pearl-caftan")?;
    cart.add_item(pearl, "white", Size::M, 1);
    wishlist.add_item(pearl);
    wishlist.add_item(pearl);

    assert_eq!(storage.len(), 2);
    assert_eq!(wishlist.len(), 1);
    assert!(wishlist.is_in_wishlist(&pearl.id));

    wishlist.remove_item(&pearl.id);
    assert!(!wishlist.is_in_wishlist(&pearl.id));
    assert_eq!(cart.total_items(), 1);

    Ok(())
}

#[test]
fn clearing_resets_both_stores() -> TestResult {
    let catalog = fixtures::default_catalog()?;
    let storage = MemoryStorage::new();
    let mut cart = CartStore::load(&storage);
    let mut wishlist = WishlistStore::load(&storage);

    for id in ["linen-gandoura", "coastal-gandoura"] {
        let gandoura = product(&catalog, id)?;
        cart.add_item(gandoura, "white", Size::L, 2);
        wishlist.add_item(gandoura);
    }

    cart.clear_cart();
    wishlist.clear_wishlist();

    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
    assert!(wishlist.is_empty());

    Ok(())
}
