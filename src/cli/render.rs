//! Table rendering for command output.

use std::{io, ops::Range};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use souk::{
    cart::CartState,
    products::{Product, Size},
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

pub(crate) fn write_products(out: &mut impl io::Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "no products match");
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Id", "Name", "Category", "Price", "Was", "Sizes", "Colors", "Stock", "Rating",
    ]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            product.price.to_string(),
            was_price(product),
            product
                .sizes
                .iter()
                .map(Size::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            product.colors.iter().collect::<Vec<_>>().join(" "),
            stock(product),
            product
                .rating
                .map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}")),
        ]);
    }

    write_table(out, builder, Columns::new(3..5))?;

    writeln!(out, "{} product(s)", products.len())
}

pub(crate) fn write_cart(out: &mut impl io::Write, state: &CartState) -> io::Result<()> {
    if state.items.is_empty() {
        return writeln!(out, "cart is empty");
    }

    let mut builder = Builder::default();
    builder.push_record(["Line", "Product", "Color", "Size", "Qty", "Unit", "Total"]);

    for item in &state.items {
        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.color.clone(),
            item.size.to_string(),
            item.quantity.to_string(),
            item.price.to_string(),
            item.line_total().to_string(),
        ]);
    }

    write_table(out, builder, Columns::new(4..7))?;

    writeln!(
        out,
        "{} item(s), total {}",
        state.total_items, state.total_price
    )
}

pub(crate) fn write_wishlist(out: &mut impl io::Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "wishlist is empty");
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Name", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            product.price.to_string(),
            stock(product),
        ]);
    }

    write_table(out, builder, Columns::new(3..4))?;

    writeln!(out, "{} liked product(s)", products.len())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Columns<Range<usize>>,
) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(numeric, Alignment::right());

    writeln!(out, "{table}")
}

fn was_price(product: &Product) -> String {
    match (product.old_price, product.discount()) {
        (Some(old_price), Some(discount)) => {
            format!("{old_price} (-{}%)", percent_points(discount))
        }
        _ => String::new(),
    }
}

fn stock(product: &Product) -> String {
    if product.in_stock() {
        product.stock.to_string()
    } else {
        "sold out".to_string()
    }
}

fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(0)
}
