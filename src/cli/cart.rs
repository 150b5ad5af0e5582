use std::io;

use clap::{Args, Subcommand};
use souk::{
    cart::{CartStore, LineItemId, clamp_quantity},
    catalog::Catalog,
    products::Size,
    storage::FileStorage,
    tags::TagCollection,
};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,

    /// Add a product variant
    Add(AddArgs),

    /// Remove a line
    Remove {
        /// Line identifier, `<product>-<color>-<size>`
        item: String,
    },

    /// Set the quantity of a line; zero or less removes it
    Update {
        /// Line identifier, `<product>-<color>-<size>`
        item: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove every line
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    product: String,

    /// Color
    #[arg(long)]
    color: String,

    /// Size
    #[arg(long)]
    size: Size,

    /// Quantity, 1 to 10
    #[arg(long, default_value_t = 1)]
    quantity: i64,
}

pub(crate) fn run(
    command: CartCommand,
    catalog: &Catalog,
    storage: &FileStorage,
) -> Result<(), String> {
    let mut cart = CartStore::load(storage);

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let product = catalog
                .get(&args.product)
                .ok_or_else(|| format!("unknown product {:?}", args.product))?;

            if !product.sizes.contains(&args.size) {
                return Err(format!("{} is not offered in size {}", product.id, args.size));
            }

            let color = args.color.trim().to_lowercase();

            if !product.colors.is_empty() && !product.colors.contains(&color) {
                return Err(format!("{} is not offered in {color}", product.id));
            }

            cart.add_item(product, &color, args.size, clamp_quantity(args.quantity));
        }
        CartSubcommand::Remove { item } => {
            let id = LineItemId::from(item);

            if cart.item(&id).is_none() {
                return Err(format!("no cart line {id}"));
            }

            cart.remove_item(&id);
        }
        CartSubcommand::Update { item, quantity } => {
            let id = LineItemId::from(item);

            if cart.item(&id).is_none() {
                return Err(format!("no cart line {id}"));
            }

            let quantity = if quantity <= 0 {
                quantity
            } else {
                i64::from(clamp_quantity(quantity))
            };

            cart.update_item_quantity(&id, quantity);
        }
        CartSubcommand::Clear => cart.clear_cart(),
    }

    render::write_cart(&mut io::stdout().lock(), cart.state())
        .map_err(|error| format!("failed to write output: {error}"))
}
