use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::config::{LoggingConfig, StoreConfig};

mod browse;
mod cart;
pub(crate) mod config;
pub(crate) mod logging;
mod render;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "souk", about = "Storefront catalog, cart and wishlist", long_about = None)]
pub(crate) struct Cli {
    /// Storage and catalog settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Browse(browse::BrowseArgs),

    /// Manage the shopping cart
    Cart(cart::CartCommand),

    /// Manage the wishlist
    Wishlist(wishlist::WishlistCommand),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        let catalog = self.store.load_catalog()?;

        debug!(products = catalog.len(), "catalog loaded");

        match self.command {
            Commands::Browse(args) => browse::run(args, &catalog),
            Commands::Cart(command) => cart::run(command, &catalog, &self.store.open_storage()?),
            Commands::Wishlist(command) => {
                wishlist::run(command, &catalog, &self.store.open_storage()?)
            }
        }
    }
}
