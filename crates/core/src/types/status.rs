//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Availability classification of an original artwork.
///
/// Display-only: it decides which actions the storefront offers for an
/// artwork (buy, enquire, nothing). The cart and wishlist never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    #[serde(alias = "for-sale")]
    ForSale,
    #[serde(alias = "enquire-only")]
    EnquireOnly,
    Exhibition,
    Commissioned,
    Sold,
}

impl Availability {
    /// All classifications, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::ForSale,
        Self::EnquireOnly,
        Self::Exhibition,
        Self::Commissioned,
        Self::Sold,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::ForSale => "For Sale",
            Self::EnquireOnly => "Enquire",
            Self::Exhibition => "On Exhibition",
            Self::Commissioned => "Commissioned",
            Self::Sold => "Sold",
        }
    }

    /// Whether the artwork can go straight into the cart.
    #[must_use]
    pub const fn offers_purchase(&self) -> bool {
        matches!(self, Self::ForSale)
    }

    /// Whether the storefront shows an enquiry action.
    #[must_use]
    pub const fn offers_enquiry(&self) -> bool {
        !matches!(self, Self::Sold)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForSale => write!(f, "for_sale"),
            Self::EnquireOnly => write!(f, "enquire_only"),
            Self::Exhibition => write!(f, "exhibition"),
            Self::Commissioned => write!(f, "commissioned"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "for_sale" => Ok(Self::ForSale),
            "enquire_only" => Ok(Self::EnquireOnly),
            "exhibition" => Ok(Self::Exhibition),
            "commissioned" => Ok(Self::Commissioned),
            "sold" => Ok(Self::Sold),
            _ => Err(format!("invalid availability: {s}")),
        }
    }
}
