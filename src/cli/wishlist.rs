use std::io;

use clap::{Args, Subcommand};
use souk::{
    catalog::Catalog, products::ProductId, storage::FileStorage, wishlist::WishlistStore,
};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show liked products
    Show,

    /// Like a product
    Add {
        /// Product identifier
        product: String,
    },

    /// Unlike a product
    Remove {
        /// Product identifier
        product: String,
    },

    /// Remove every liked product
    Clear,
}

pub(crate) fn run(
    command: WishlistCommand,
    catalog: &Catalog,
    storage: &FileStorage,
) -> Result<(), String> {
    let mut wishlist = WishlistStore::load(storage);

    match command.command {
        WishlistSubcommand::Show => {}
        WishlistSubcommand::Add { product } => {
            let product = catalog
                .get(&product)
                .ok_or_else(|| format!("unknown product {product:?}"))?;

            wishlist.add_item(product);
        }
        WishlistSubcommand::Remove { product } => {
            if !wishlist.remove_item(&ProductId::new(product.as_str())) {
                return Err(format!("{product} is not in the wishlist"));
            }
        }
        WishlistSubcommand::Clear => wishlist.clear_wishlist(),
    }

    render::write_wishlist(&mut io::stdout().lock(), wishlist.items())
        .map_err(|error| format!("failed to write output: {error}"))
}
