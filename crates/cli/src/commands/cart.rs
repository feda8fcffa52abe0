//! Cart commands.

use std::io::Write;

use clap::Subcommand;
use rust_decimal::Decimal;

use gallery_core::{ItemKey, PrintSize, PrintType};
use gallery_storefront::StorefrontState;
use gallery_storefront::models::CartItem;

use super::{ArtworkArgs, stdout};

#[derive(Subcommand)]
pub enum CartAction {
    /// Add an original artwork
    Add {
        #[command(flatten)]
        artwork: ArtworkArgs,

        /// Price in whole currency units
        #[arg(long)]
        price: Decimal,

        /// Number of copies
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Add a print of an artwork
    AddPrint {
        #[command(flatten)]
        artwork: ArtworkArgs,

        /// Print size (a4, a3, a2, a1)
        #[arg(long)]
        size: PrintSize,

        /// Print type (paper, canvas)
        #[arg(long = "type")]
        print_type: PrintType,

        /// Number of copies
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line by item id
    Remove {
        /// Item id, e.g. `7GxQ2` or `7GxQ2-print-a3-canvas`
        id: String,
    },
    /// Set the quantity of a line (0 removes it)
    Set {
        /// Item id
        id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove every line
    Clear,
    /// List the cart
    Show,
}

/// Apply a cart action, then print the cart.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run(state: &mut StorefrontState, action: CartAction) -> std::io::Result<()> {
    match action {
        CartAction::Add {
            artwork,
            price,
            quantity,
        } => {
            let summary = artwork.summary().with_price(price);
            if let Some(item) = CartItem::original(&summary) {
                tracing::info!(id = %item.key, quantity, "Adding original to cart");
                state.cart_mut().add_item(item, quantity);
            }
        }
        CartAction::AddPrint {
            artwork,
            size,
            print_type,
            quantity,
        } => {
            let item = CartItem::print(&artwork.summary(), size, print_type);
            tracing::info!(id = %item.key, quantity, "Adding print to cart");
            state.cart_mut().add_item(item, quantity);
        }
        CartAction::Remove { id } => {
            let key = ItemKey::parse(&id);
            if !state.cart().is_in_cart(&key) {
                tracing::warn!(%key, "Item is not in the cart");
            }
            state.cart_mut().remove_item(&key);
        }
        CartAction::Set { id, quantity } => {
            let key = ItemKey::parse(&id);
            if !state.cart().is_in_cart(&key) {
                tracing::warn!(%key, "Item is not in the cart");
            }
            state.cart_mut().update_quantity(&key, quantity);
        }
        CartAction::Clear => {
            state.cart_mut().clear();
            tracing::info!("Cart cleared");
        }
        CartAction::Show => {}
    }

    show(state)
}

fn show(state: &StorefrontState) -> std::io::Result<()> {
    let cart = state.cart();
    let mut out = stdout();

    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for line in cart.lines() {
        writeln!(
            out,
            "{:<32} {:>3} x {:>10} = {:>10}  {} by {}",
            line.item.key.to_string(),
            line.quantity,
            state.format_price(line.item.price),
            state.format_price(line.line_total()),
            line.item.title,
            line.item.artist,
        )?;
    }
    writeln!(
        out,
        "{} item(s), total {}",
        cart.total_item_count(),
        state.format_price(cart.total_price())
    )?;

    Ok(())
}
