//! Identity of purchasable and saveable items.
//!
//! An item is either an original artwork or one print configuration of an
//! artwork. In memory that is the [`ItemKey`] union; on disk and on the
//! command line it is a single string:
//!
//! - original: `<artworkId>`
//! - print: `<artworkId>-print-<size>-<type>`
//!
//! [`ItemKey`]'s `Display` impl is the only encoder of that string, and two
//! keys are the same item exactly when they encode to the same string. An
//! original whose artwork id reads `X-print-a3-paper` therefore collides with
//! the A3 paper print of `X`, and a store holds at most one of them.

use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::id::ArtworkId;
use super::print::{PrintSize, PrintType};

const PRINT_SEGMENT: &str = "-print-";

/// Errors from decoding a stored item id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("item id cannot be empty")]
    Empty,
    #[error("malformed print id: {0}")]
    MalformedPrintId(String),
}

/// Discriminant stored next to the encoded id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Original,
    Print,
}

/// Identity of a cart line or wishlist entry.
///
/// Equality and hashing follow the encoded id, not the variant.
#[derive(Debug, Clone)]
pub enum ItemKey {
    Original {
        artwork_id: ArtworkId,
    },
    Print {
        artwork_id: ArtworkId,
        size: PrintSize,
        print_type: PrintType,
    },
}

impl ItemKey {
    #[must_use]
    pub const fn original(artwork_id: ArtworkId) -> Self {
        Self::Original { artwork_id }
    }

    #[must_use]
    pub const fn print(artwork_id: ArtworkId, size: PrintSize, print_type: PrintType) -> Self {
        Self::Print {
            artwork_id,
            size,
            print_type,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Original { .. } => ItemKind::Original,
            Self::Print { .. } => ItemKind::Print,
        }
    }

    /// The artwork this item is, or is a print of.
    #[must_use]
    pub const fn artwork_id(&self) -> &ArtworkId {
        match self {
            Self::Original { artwork_id } | Self::Print { artwork_id, .. } => artwork_id,
        }
    }

    /// Best-effort parse of free-form input.
    ///
    /// Anything that does not decode as a print id is treated as an
    /// original artwork id.
    #[must_use]
    pub fn parse(id: &str) -> Self {
        parse_print(id).unwrap_or_else(|| Self::original(ArtworkId::new(id)))
    }

    /// Decode a stored id whose kind is already known.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Empty` for an empty id and
    /// `KeyError::MalformedPrintId` when a print id does not follow the
    /// `<artworkId>-print-<size>-<type>` shape.
    pub fn decode(kind: ItemKind, id: &str) -> Result<Self, KeyError> {
        if id.is_empty() {
            return Err(KeyError::Empty);
        }

        match kind {
            ItemKind::Original => Ok(Self::original(ArtworkId::new(id))),
            ItemKind::Print => {
                parse_print(id).ok_or_else(|| KeyError::MalformedPrintId(id.to_string()))
            }
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original { artwork_id } => write!(f, "{artwork_id}"),
            Self::Print {
                artwork_id,
                size,
                print_type,
            } => write!(f, "{artwork_id}{PRINT_SEGMENT}{size}-{print_type}"),
        }
    }
}

impl PartialEq for ItemKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Original { artwork_id: a }, Self::Original { artwork_id: b }) => a == b,
            (
                Self::Print {
                    artwork_id: a,
                    size: a_size,
                    print_type: a_type,
                },
                Self::Print {
                    artwork_id: b,
                    size: b_size,
                    print_type: b_type,
                },
            ) => a == b && a_size == b_size && a_type == b_type,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for ItemKey {}

impl Hash for ItemKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// Canonical id string for a print configuration.
#[must_use]
pub fn compose_print_id(artwork_id: &ArtworkId, size: PrintSize, print_type: PrintType) -> String {
    ItemKey::print(artwork_id.clone(), size, print_type).to_string()
}

fn parse_print(id: &str) -> Option<ItemKey> {
    let (rest, print_type) = id.rsplit_once('-')?;
    let print_type = PrintType::from_code(print_type)?;
    let (rest, size) = rest.rsplit_once('-')?;
    let size = PrintSize::from_code(size)?;
    let artwork_id = rest.strip_suffix("-print")?;
    if artwork_id.is_empty() {
        return None;
    }

    Some(ItemKey::print(ArtworkId::new(artwork_id), size, print_type))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_compose_print_id_format() {
        let id = compose_print_id(&ArtworkId::new("abc"), PrintSize::A3, PrintType::Canvas);
        assert_eq!(id, "abc-print-a3-canvas");
    }

    #[test]
    fn test_compose_print_id_is_deterministic() {
        let artwork = ArtworkId::new("7GxQ2");
        let first = compose_print_id(&artwork, PrintSize::A3, PrintType::Canvas);
        let second = compose_print_id(&artwork, PrintSize::A3, PrintType::Canvas);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_compose_print_id_never_collides_for_one_artwork() {
        let artwork = ArtworkId::new("7GxQ2");
        let mut seen = HashSet::new();
        for size in PrintSize::ALL {
            for print_type in PrintType::ALL {
                assert!(seen.insert(compose_print_id(&artwork, size, print_type)));
            }
        }
        assert!(!seen.contains(artwork.as_str()));
    }

    #[test]
    fn test_parse_print_id() {
        let key = ItemKey::parse("abc-print-a2-paper");
        assert_eq!(
            key,
            ItemKey::print(ArtworkId::new("abc"), PrintSize::A2, PrintType::Paper)
        );
        assert_eq!(key.kind(), ItemKind::Print);
    }

    #[test]
    fn test_parse_artwork_id_containing_hyphens() {
        let key = ItemKey::parse("blue-period-3-print-a4-canvas");
        assert_eq!(key.artwork_id().as_str(), "blue-period-3");

        let key = ItemKey::parse("blue-period-3");
        assert_eq!(key, ItemKey::original(ArtworkId::new("blue-period-3")));
    }

    #[test]
    fn test_parse_falls_back_to_original() {
        for id in ["abc", "abc-print-a9-paper", "abc-print-a3-vinyl", "-print-a3-paper"] {
            assert_eq!(ItemKey::parse(id).kind(), ItemKind::Original, "{id}");
        }
    }

    #[test]
    fn test_encoding_round_trips_through_decode() {
        let key = ItemKey::print(ArtworkId::new("a-b"), PrintSize::A1, PrintType::Canvas);
        let decoded = ItemKey::decode(ItemKind::Print, &key.to_string()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_original_with_print_shaped_id_equals_print_key() {
        let original = ItemKey::decode(ItemKind::Original, "X-print-a3-paper").unwrap();
        let print = ItemKey::print(ArtworkId::new("X"), PrintSize::A3, PrintType::Paper);

        assert_eq!(original, print);
        assert_eq!(print, original);

        let mut seen = HashSet::new();
        assert!(seen.insert(original));
        assert!(!seen.insert(print));
    }

    #[test]
    fn test_keys_of_different_items_differ() {
        let artwork = ArtworkId::new("X");
        let original = ItemKey::original(artwork.clone());
        let paper = ItemKey::print(artwork.clone(), PrintSize::A3, PrintType::Paper);
        let canvas = ItemKey::print(artwork, PrintSize::A3, PrintType::Canvas);

        assert_ne!(original, paper);
        assert_ne!(paper, canvas);
        assert_ne!(
            ItemKey::original(ArtworkId::new("X-print-a3")),
            ItemKey::original(ArtworkId::new("X-print-a4"))
        );
    }

    #[test]
    fn test_decode_respects_kind() {
        // An original whose id happens to look like a print stays an original.
        let key = ItemKey::decode(ItemKind::Original, "abc-print-a3-paper").unwrap();
        assert_eq!(key.kind(), ItemKind::Original);

        assert_eq!(
            ItemKey::decode(ItemKind::Print, "abc"),
            Err(KeyError::MalformedPrintId("abc".to_string()))
        );
        assert_eq!(ItemKey::decode(ItemKind::Original, ""), Err(KeyError::Empty));
    }
}
