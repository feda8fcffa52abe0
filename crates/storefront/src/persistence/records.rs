//! On-disk shapes of the cart and wishlist.
//!
//! Item identities are flattened to their string form here and decoded back
//! into [`ItemKey`] on load. Records that no longer decode are dropped with a
//! warning rather than failing the whole load.
//!
//! # Wishlist schema versions
//!
//! - `0`: entries carry no `type` discriminant and no print fields; every
//!   entry is an original.
//! - `1`: entries carry `type` (`original` | `print`) and, for prints, the
//!   size and print type codes and display names.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gallery_core::{Availability, ItemKey, ItemKind, KeyError};

use super::Persisted;
use crate::models::{CartItem, CartLine, ItemDetails, SavedItem, WishlistEntry};

// =============================================================================
// Cart
// =============================================================================

/// Persisted cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCart {
    #[serde(default)]
    pub items: Vec<StoredCartLine>,
}

impl Persisted for PersistedCart {
    const STORAGE_KEY: &'static str = "gallery-cart";
    const VERSION: u32 = 0;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCartLine {
    pub item: StoredCartItem,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCartItem {
    pub id: String,
    /// Absent in carts written before print lines existed.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    pub title: String,
    pub artist: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl From<&CartLine> for StoredCartLine {
    fn from(line: &CartLine) -> Self {
        let item = &line.item;
        Self {
            item: StoredCartItem {
                id: item.key.to_string(),
                kind: Some(item.key.kind()),
                title: item.title.clone(),
                artist: item.artist.clone(),
                price: item.price,
                image_url: item.image_url.clone(),
                medium: item.details.medium.clone(),
                dimensions: item.details.dimensions.clone(),
                year: item.details.year,
            },
            quantity: line.quantity,
            added_at: line.added_at,
        }
    }
}

impl TryFrom<StoredCartLine> for CartLine {
    type Error = KeyError;

    fn try_from(stored: StoredCartLine) -> Result<Self, Self::Error> {
        let item = stored.item;
        let key = match item.kind {
            Some(kind) => ItemKey::decode(kind, &item.id)?,
            None if item.id.is_empty() => return Err(KeyError::Empty),
            None => ItemKey::parse(&item.id),
        };

        Ok(Self {
            item: CartItem {
                key,
                title: item.title,
                artist: item.artist,
                price: item.price,
                image_url: item.image_url,
                details: ItemDetails {
                    medium: item.medium,
                    dimensions: item.dimensions,
                    year: item.year,
                },
            },
            quantity: stored.quantity,
            added_at: stored.added_at,
        })
    }
}

impl PersistedCart {
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            items: lines.iter().map(StoredCartLine::from).collect(),
        }
    }

    /// Decode stored lines, dropping undecodable, zero-quantity and duplicate rows.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(self.items.len());

        for stored in self.items {
            let id = stored.item.id.clone();
            match CartLine::try_from(stored) {
                Ok(line) if line.quantity == 0 => {
                    tracing::warn!(id = %id, "Dropping stored cart line with zero quantity");
                }
                Ok(line) => {
                    if seen.insert(line.item.key.clone()) {
                        lines.push(line);
                    } else {
                        tracing::warn!(id = %id, "Dropping duplicate stored cart line");
                    }
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Dropping undecodable cart line");
                }
            }
        }

        lines
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// Persisted wishlist state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWishlist {
    #[serde(default)]
    pub items: Vec<StoredWishlistEntry>,
}

impl Persisted for PersistedWishlist {
    const STORAGE_KEY: &'static str = "gallery-wishlist";
    const VERSION: u32 = 1;

    fn migrate(mut self, from_version: u32) -> Self {
        if from_version < 1 {
            upgrade_legacy_entries(&mut self.items);
        }
        self
    }
}

/// Version 0 → 1: untyped entries become originals.
///
/// Entries that already carry a kind are left exactly as they are, so running
/// this twice is the same as running it once.
pub fn upgrade_legacy_entries(items: &mut [StoredWishlistEntry]) {
    for entry in items.iter_mut().filter(|entry| entry.kind.is_none()) {
        entry.kind = Some(ItemKind::Original);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWishlistEntry {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_size_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_type_name: Option<String>,
}

impl From<&WishlistEntry> for StoredWishlistEntry {
    fn from(entry: &WishlistEntry) -> Self {
        let mut stored = Self {
            id: entry.key().to_string(),
            kind: Some(entry.kind()),
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            image_url: entry.image_url.clone(),
            price: entry.price,
            availability: None,
            print_size: None,
            print_size_name: None,
            print_type: None,
            print_type_name: None,
        };

        match &entry.saved {
            SavedItem::Original { availability, .. } => stored.availability = *availability,
            SavedItem::Print {
                size,
                size_name,
                print_type,
                print_type_name,
                ..
            } => {
                stored.print_size = Some(size.code().to_string());
                stored.print_size_name = Some(size_name.clone());
                stored.print_type = Some(print_type.code().to_string());
                stored.print_type_name = Some(print_type_name.clone());
            }
        }

        stored
    }
}

impl TryFrom<StoredWishlistEntry> for WishlistEntry {
    type Error = KeyError;

    fn try_from(stored: StoredWishlistEntry) -> Result<Self, Self::Error> {
        // Unmigrated data can only be an original.
        let kind = stored.kind.unwrap_or(ItemKind::Original);

        let saved = match ItemKey::decode(kind, &stored.id)? {
            ItemKey::Original { artwork_id } => SavedItem::Original {
                artwork_id,
                availability: stored.availability,
            },
            ItemKey::Print {
                artwork_id,
                size,
                print_type,
            } => SavedItem::Print {
                artwork_id,
                size,
                size_name: stored
                    .print_size_name
                    .unwrap_or_else(|| size.display_name().to_string()),
                print_type,
                print_type_name: stored
                    .print_type_name
                    .unwrap_or_else(|| print_type.display_name().to_string()),
            },
        };

        Ok(Self {
            saved,
            title: stored.title,
            artist: stored.artist,
            image_url: stored.image_url,
            price: stored.price,
        })
    }
}

impl PersistedWishlist {
    #[must_use]
    pub fn from_entries(entries: &[WishlistEntry]) -> Self {
        Self {
            items: entries.iter().map(StoredWishlistEntry::from).collect(),
        }
    }

    /// Decode stored entries, dropping undecodable and duplicate ids.
    #[must_use]
    pub fn into_entries(self) -> Vec<WishlistEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.items.len());

        for stored in self.items {
            let id = stored.id.clone();
            match WishlistEntry::try_from(stored) {
                Ok(entry) => {
                    if seen.insert(entry.key()) {
                        entries.push(entry);
                    } else {
                        tracing::warn!(id = %id, "Dropping duplicate stored wishlist entry");
                    }
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Dropping undecodable wishlist entry");
                }
            }
        }

        entries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gallery_core::{ArtworkId, PrintSize, PrintType};

    use super::*;
    use crate::models::ArtworkSummary;

    fn legacy_entry(id: &str) -> StoredWishlistEntry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "Old Save",
            "artist": "Anon",
            "price": 900,
            "availability": "for_sale"
        }))
        .unwrap()
    }

    #[test]
    fn test_upgrade_sets_original_kind() {
        let mut items = vec![legacy_entry("a"), legacy_entry("b")];
        upgrade_legacy_entries(&mut items);
        assert!(items.iter().all(|e| e.kind == Some(ItemKind::Original)));
        assert!(items.iter().all(|e| e.print_size.is_none()));
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let artwork = ArtworkSummary::new("p", "Print Me", "Anon");
        let print = StoredWishlistEntry::from(&WishlistEntry::print(
            &artwork,
            PrintSize::A4,
            PrintType::Canvas,
        ));

        let once = PersistedWishlist {
            items: vec![legacy_entry("a"), print.clone()],
        }
        .migrate(0);
        let twice = once.clone().migrate(0);

        assert_eq!(once, twice);
        assert_eq!(once.items.get(1), Some(&print));
    }

    #[test]
    fn test_current_version_is_not_migrated() {
        let state = PersistedWishlist {
            items: vec![legacy_entry("a")],
        };
        let migrated = state.clone().migrate(PersistedWishlist::VERSION);
        assert_eq!(migrated, state);
    }

    #[test]
    fn test_print_entry_round_trips_through_record() {
        let artwork = ArtworkSummary::new("X", "Field", "Anon");
        let entry = WishlistEntry::print(&artwork, PrintSize::A3, PrintType::Paper);

        let stored = StoredWishlistEntry::from(&entry);
        assert_eq!(stored.id, "X-print-a3-paper");
        assert_eq!(stored.print_size.as_deref(), Some("a3"));
        assert_eq!(stored.print_type_name.as_deref(), Some("Fine Art Paper"));

        assert_eq!(WishlistEntry::try_from(stored).unwrap(), entry);
    }

    #[test]
    fn test_record_json_uses_type_discriminant() {
        let artwork = ArtworkSummary::new("X", "Field", "Anon");
        let stored = StoredWishlistEntry::from(&WishlistEntry::original(&artwork));
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["type"], "original");
        assert!(json.get("printSize").is_none());
    }

    #[test]
    fn test_into_entries_drops_malformed_and_duplicates() {
        let mut bad_print = legacy_entry("not-a-print");
        bad_print.kind = Some(ItemKind::Print);

        let state = PersistedWishlist {
            items: vec![legacy_entry("a"), bad_print, legacy_entry("a")],
        };
        let entries = state.into_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(WishlistEntry::artwork_id), Some(&ArtworkId::new("a")));
    }

    #[test]
    fn test_legacy_cart_line_without_type_is_parsed() {
        let stored: StoredCartLine = serde_json::from_value(serde_json::json!({
            "item": {
                "id": "abc-print-a4-paper",
                "title": "Abc - Fine Art Paper (A4)",
                "artist": "Anon",
                "price": 150
            },
            "quantity": 2,
            "addedAt": "2026-01-05T10:00:00Z"
        }))
        .unwrap();

        let line = CartLine::try_from(stored).unwrap();
        assert_eq!(line.item.key.kind(), ItemKind::Print);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.item.price, Decimal::from(150));
    }

    #[test]
    fn test_into_lines_drops_zero_quantity() {
        let stored: StoredCartLine = serde_json::from_value(serde_json::json!({
            "item": { "id": "a", "type": "original", "title": "A", "artist": "B", "price": "10" },
            "quantity": 0,
            "addedAt": "2026-01-05T10:00:00Z"
        }))
        .unwrap();

        let lines = PersistedCart {
            items: vec![stored],
        }
        .into_lines();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_into_entries_treats_same_encoded_id_as_duplicate() {
        let mut original = legacy_entry("X-print-a3-paper");
        original.kind = Some(ItemKind::Original);
        let print = StoredWishlistEntry::from(&WishlistEntry::print(
            &ArtworkSummary::new("X", "X", "Anon"),
            PrintSize::A3,
            PrintType::Paper,
        ));
        assert_eq!(original.id, print.id);

        let entries = PersistedWishlist {
            items: vec![original, print],
        }
        .into_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(WishlistEntry::kind), Some(ItemKind::Original));
    }

    #[test]
    fn test_into_lines_treats_same_encoded_id_as_duplicate() {
        let row = |kind: &str| -> StoredCartLine {
            serde_json::from_value(serde_json::json!({
                "item": { "id": "X-print-a3-paper", "type": kind, "title": "X", "artist": "B", "price": "10" },
                "quantity": 1,
                "addedAt": "2026-01-05T10:00:00Z"
            }))
            .unwrap()
        };

        let lines = PersistedCart {
            items: vec![row("print"), row("original")],
        }
        .into_lines();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|line| line.item.key.kind()), Some(ItemKind::Print));
    }
}
