//! Cart items and lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use gallery_core::{ItemKey, PrintSize, PrintType, price_for_configuration};

use super::artwork::ArtworkSummary;

/// Descriptive metadata shown next to a cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetails {
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub year: Option<i32>,
}

/// Snapshot of something purchasable, frozen when it enters the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub key: ItemKey,
    pub title: String,
    pub artist: String,
    /// Unit price in whole currency units, as quoted when added.
    pub price: Decimal,
    pub image_url: Option<String>,
    pub details: ItemDetails,
}

impl CartItem {
    /// Cart item for an original artwork.
    ///
    /// Returns `None` when the artwork has no listed price (price on request).
    #[must_use]
    pub fn original(artwork: &ArtworkSummary) -> Option<Self> {
        let price = artwork.price?;
        Some(Self {
            key: ItemKey::original(artwork.id.clone()),
            title: artwork.title.clone(),
            artist: artwork.artist.clone(),
            price,
            image_url: artwork.image_url.clone(),
            details: ItemDetails {
                medium: artwork.medium.clone(),
                dimensions: artwork.dimensions.clone(),
                year: artwork.year,
            },
        })
    }

    /// Cart item for a print of an artwork, priced from the print table.
    #[must_use]
    pub fn print(artwork: &ArtworkSummary, size: PrintSize, print_type: PrintType) -> Self {
        let key = ItemKey::print(artwork.id.clone(), size, print_type);
        Self {
            key,
            title: gallery_core::format_print_title(
                &artwork.title,
                print_type.display_name(),
                size.display_name(),
            ),
            artist: artwork.artist.clone(),
            price: price_for_configuration(size, print_type),
            image_url: artwork.image_url.clone(),
            details: ItemDetails {
                medium: Some(print_type.display_name().to_string()),
                dimensions: Some(size.dimensions().to_string()),
                year: artwork.year,
            },
        }
    }
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CartItem,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Unit price × quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price.saturating_mul(Decimal::from(self.quantity))
    }
}
