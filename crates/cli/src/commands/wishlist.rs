//! Wishlist commands.

use std::io::Write;

use clap::Subcommand;
use rust_decimal::Decimal;

use gallery_core::{ArtworkId, Availability, ItemKey, PrintSize, PrintType};
use gallery_storefront::StorefrontState;
use gallery_storefront::models::{SavedItem, WishlistEntry};

use super::{ArtworkArgs, stdout};

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Save an original artwork
    Add {
        #[command(flatten)]
        artwork: ArtworkArgs,

        /// Listed price, if any
        #[arg(long)]
        price: Option<Decimal>,

        /// Availability (for-sale, enquire-only, exhibition, commissioned, sold)
        #[arg(long, default_value = "for-sale")]
        availability: Availability,
    },
    /// Save a print configuration
    AddPrint {
        #[command(flatten)]
        artwork: ArtworkArgs,

        /// Print size (a4, a3, a2, a1)
        #[arg(long)]
        size: PrintSize,

        /// Print type (paper, canvas)
        #[arg(long = "type")]
        print_type: PrintType,
    },
    /// Remove an entry by item id
    Remove {
        /// Item id, e.g. `7GxQ2` or `7GxQ2-print-a3-canvas`
        id: String,
    },
    /// Remove every entry
    Clear,
    /// List saved entries
    Show {
        /// Only show entries for this artwork
        #[arg(long)]
        artwork: Option<String>,
    },
}

/// Apply a wishlist action, then print the wishlist.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run(state: &mut StorefrontState, action: WishlistAction) -> std::io::Result<()> {
    let mut filter = None;

    match action {
        WishlistAction::Add {
            artwork,
            price,
            availability,
        } => {
            let mut summary = artwork.summary().with_availability(availability);
            if let Some(price) = price {
                summary = summary.with_price(price);
            }
            save(state, WishlistEntry::original(&summary));
        }
        WishlistAction::AddPrint {
            artwork,
            size,
            print_type,
        } => save(
            state,
            WishlistEntry::print(&artwork.summary(), size, print_type),
        ),
        WishlistAction::Remove { id } => {
            let key = ItemKey::parse(&id);
            if !state.wishlist().is_in_wishlist(&key) {
                tracing::warn!(%key, "Item is not in the wishlist");
            }
            state.wishlist_mut().remove_item(&key);
        }
        WishlistAction::Clear => {
            state.wishlist_mut().clear();
            tracing::info!("Wishlist cleared");
        }
        WishlistAction::Show { artwork } => filter = artwork.map(ArtworkId::new),
    }

    show(state, filter.as_ref())
}

fn save(state: &mut StorefrontState, entry: WishlistEntry) {
    let key = entry.key();
    if state.wishlist_mut().add_item(entry) {
        tracing::info!(%key, "Saved to wishlist");
    } else {
        tracing::info!(%key, "Already in wishlist");
    }
}

fn show(state: &StorefrontState, artwork: Option<&ArtworkId>) -> std::io::Result<()> {
    let wishlist = state.wishlist();
    let mut out = stdout();

    let entries: Vec<&WishlistEntry> = match artwork {
        Some(artwork_id) => wishlist.items_by_artwork(artwork_id),
        None => wishlist.entries().iter().collect(),
    };

    if entries.is_empty() {
        writeln!(out, "Wishlist is empty")?;
        return Ok(());
    }

    for entry in &entries {
        let price = entry
            .price
            .map_or_else(|| "-".to_string(), |price| state.format_price(price));
        let detail = match &entry.saved {
            SavedItem::Original { availability, .. } => availability
                .map_or_else(String::new, |availability| availability.display_name().to_string()),
            SavedItem::Print {
                size_name,
                print_type_name,
                ..
            } => format!("{print_type_name} ({size_name})"),
        };
        writeln!(
            out,
            "{:<32} {:>10}  {} by {}  {}",
            entry.key().to_string(),
            price,
            entry.title,
            entry.artist,
            detail,
        )?;
    }
    writeln!(
        out,
        "{} saved ({} original(s), {} print(s))",
        wishlist.len(),
        wishlist.originals().len(),
        wishlist.prints().len()
    )?;

    Ok(())
}
