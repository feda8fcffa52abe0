//! Saved-for-later entries.

use rust_decimal::Decimal;

use gallery_core::{ArtworkId, Availability, ItemKey, ItemKind, PrintSize, PrintType};

use super::artwork::ArtworkSummary;

/// What an entry refers to. Print-only fields exist only on the print variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedItem {
    Original {
        artwork_id: ArtworkId,
        availability: Option<Availability>,
    },
    Print {
        artwork_id: ArtworkId,
        size: PrintSize,
        size_name: String,
        print_type: PrintType,
        print_type_name: String,
    },
}

/// One saved original or print configuration.
///
/// Entries are never edited in place; remove and re-add to change one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    pub saved: SavedItem,
    /// For prints, already formatted with type and size.
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    /// `None` means "price on request".
    pub price: Option<Decimal>,
}

impl WishlistEntry {
    #[must_use]
    pub fn original(artwork: &ArtworkSummary) -> Self {
        Self {
            saved: SavedItem::Original {
                artwork_id: artwork.id.clone(),
                availability: Some(artwork.availability),
            },
            title: artwork.title.clone(),
            artist: artwork.artist.clone(),
            image_url: artwork.image_url.clone(),
            price: artwork.price,
        }
    }

    #[must_use]
    pub fn print(artwork: &ArtworkSummary, size: PrintSize, print_type: PrintType) -> Self {
        Self {
            saved: SavedItem::Print {
                artwork_id: artwork.id.clone(),
                size,
                size_name: size.display_name().to_string(),
                print_type,
                print_type_name: print_type.display_name().to_string(),
            },
            title: gallery_core::format_print_title(
                &artwork.title,
                print_type.display_name(),
                size.display_name(),
            ),
            artist: artwork.artist.clone(),
            image_url: artwork.image_url.clone(),
            price: Some(gallery_core::price_for_configuration(size, print_type)),
        }
    }

    /// Identity used for dedup and lookup.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        match &self.saved {
            SavedItem::Original { artwork_id, .. } => ItemKey::original(artwork_id.clone()),
            SavedItem::Print {
                artwork_id,
                size,
                print_type,
                ..
            } => ItemKey::print(artwork_id.clone(), *size, *print_type),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self.saved {
            SavedItem::Original { .. } => ItemKind::Original,
            SavedItem::Print { .. } => ItemKind::Print,
        }
    }

    #[must_use]
    pub const fn artwork_id(&self) -> &ArtworkId {
        match &self.saved {
            SavedItem::Original { artwork_id, .. } | SavedItem::Print { artwork_id, .. } => {
                artwork_id
            }
        }
    }

    /// Availability of the original; always `None` for prints.
    #[must_use]
    pub const fn availability(&self) -> Option<Availability> {
        match self.saved {
            SavedItem::Original { availability, .. } => availability,
            SavedItem::Print { .. } => None,
        }
    }
}
