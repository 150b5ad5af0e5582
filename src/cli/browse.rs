use std::io;

use clap::Args;
use souk::{
    catalog::{Catalog, CatalogQuery, CategoryFilter, PriceRange, SortKey},
    products::Size,
    tags::{SizeSet, StringTagCollection},
};

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct BrowseArgs {
    /// Category to list, or `all`
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Collection name (e.g. wedding, everyday)
    #[arg(long)]
    collection: Option<String>,

    /// Price range, `min-max` or `min+`
    #[arg(long)]
    price: Option<PriceRange>,

    /// Size to include; repeat to select several
    #[arg(long = "size")]
    sizes: Vec<Size>,

    /// Color to include; repeat to select several
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Only list products that are in stock
    #[arg(long)]
    available: bool,

    /// Ordering: featured, price-low, price-high, newest, rating
    #[arg(long, default_value = "featured")]
    sort: SortKey,
}

pub(crate) fn run(args: BrowseArgs, catalog: &Catalog) -> Result<(), String> {
    let mut query = CatalogQuery::new()
        .category(args.category)
        .sizes(args.sizes.into_iter().collect::<SizeSet>())
        .colors(StringTagCollection::new(args.colors))
        .available_only(args.available)
        .sort(args.sort);

    if let Some(name) = &args.collection {
        let collection = catalog.collection(name).ok_or_else(|| {
            let known: Vec<&str> = catalog
                .collections()
                .iter()
                .map(|collection| collection.name.as_str())
                .collect();

            format!("unknown collection {name:?}; known: {}", known.join(", "))
        })?;

        query = query.collection(collection);
    }

    if let Some(range) = args.price {
        query = query.price(range);
    }

    let products = catalog.browse(&query);

    render::write_products(&mut io::stdout().lock(), &products)
        .map_err(|error| format!("failed to write output: {error}"))
}
