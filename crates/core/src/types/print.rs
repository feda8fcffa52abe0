//! Fine-art print configurations and their pricing.
//!
//! A print is priced from a per-size base price (the paper price) scaled by a
//! per-type multiplier, then rounded to the nearest whole currency unit:
//!
//! | Size | Dimensions     | Paper (×1.00) | Canvas (×1.35) |
//! |------|----------------|---------------|----------------|
//! | A4   | 21 × 29.7 cm   | 150           | 203            |
//! | A3   | 29.7 × 42 cm   | 250           | 338            |
//! | A2   | 42 × 59.4 cm   | 400           | 540            |
//! | A1   | 59.4 × 84.1 cm | 650           | 878            |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ArtworkId;
use super::key::ItemKey;
use super::price::round_to_whole_units;

/// Errors from parsing print size or type codes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintCodeError {
    #[error("unknown print size: {0}")]
    UnknownSize(String),
    #[error("unknown print type: {0}")]
    UnknownType(String),
}

/// Paper sizes prints are produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintSize {
    A4,
    A3,
    A2,
    A1,
}

impl PrintSize {
    /// All sizes, smallest first.
    pub const ALL: [Self; 4] = [Self::A4, Self::A3, Self::A2, Self::A1];

    /// Code used in item ids and storage (`a4`, `a3`, ...).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::A3 => "a3",
            Self::A2 => "a2",
            Self::A1 => "a1",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A3 => "A3",
            Self::A2 => "A2",
            Self::A1 => "A1",
        }
    }

    /// Physical dimensions of the sheet.
    #[must_use]
    pub const fn dimensions(&self) -> &'static str {
        match self {
            Self::A4 => "21 × 29.7 cm",
            Self::A3 => "29.7 × 42 cm",
            Self::A2 => "42 × 59.4 cm",
            Self::A1 => "59.4 × 84.1 cm",
        }
    }

    /// Base price in whole currency units, before the print type multiplier.
    #[must_use]
    pub fn base_price(&self) -> Decimal {
        match self {
            Self::A4 => Decimal::from(150),
            Self::A3 => Decimal::from(250),
            Self::A2 => Decimal::from(400),
            Self::A1 => Decimal::from(650),
        }
    }

    /// Exact, case-sensitive match on a stored code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.code() == code)
    }
}

impl std::fmt::Display for PrintSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for PrintSize {
    type Err = PrintCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| PrintCodeError::UnknownSize(s.to_string()))
    }
}

/// Print media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintType {
    Paper,
    Canvas,
}

impl PrintType {
    pub const ALL: [Self; 2] = [Self::Paper, Self::Canvas];

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Canvas => "canvas",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Paper => "Fine Art Paper",
            Self::Canvas => "Stretched Canvas",
        }
    }

    /// Multiplier applied to the size's base price.
    #[must_use]
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Paper => Decimal::ONE,
            Self::Canvas => Decimal::new(135, 2),
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }
}

impl std::fmt::Display for PrintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for PrintType {
    type Err = PrintCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| PrintCodeError::UnknownType(s.to_string()))
    }
}

/// Price of a print in whole currency units.
#[must_use]
pub fn price_for_configuration(size: PrintSize, print_type: PrintType) -> Decimal {
    round_to_whole_units(size.base_price() * print_type.multiplier())
}

/// Title stored on cart lines and wishlist entries for a print.
///
/// Stored rather than recomputed, so the format must stay stable.
#[must_use]
pub fn format_print_title(artwork_title: &str, type_display: &str, size_display: &str) -> String {
    format!("{artwork_title} - {type_display} ({size_display})")
}

/// One row of the print price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub size: PrintSize,
    pub print_type: PrintType,
    pub price: Decimal,
}

/// Every size and type combination with its price, sizes ascending.
#[must_use]
pub fn price_table() -> Vec<PriceRow> {
    PrintSize::ALL
        .into_iter()
        .flat_map(|size| {
            PrintType::ALL.into_iter().map(move |print_type| PriceRow {
                size,
                print_type,
                price: price_for_configuration(size, print_type),
            })
        })
        .collect()
}

/// A concrete print of an artwork: what a visitor picks on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrintSelection {
    pub artwork_id: ArtworkId,
    pub size: PrintSize,
    pub print_type: PrintType,
}

impl PrintSelection {
    #[must_use]
    pub const fn new(artwork_id: ArtworkId, size: PrintSize, print_type: PrintType) -> Self {
        Self {
            artwork_id,
            size,
            print_type,
        }
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        price_for_configuration(self.size, self.print_type)
    }

    /// Stored title for this print of `artwork_title`.
    #[must_use]
    pub fn title(&self, artwork_title: &str) -> String {
        format_print_title(
            artwork_title,
            self.print_type.display_name(),
            self.size.display_name(),
        )
    }

    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey::Print {
            artwork_id: self.artwork_id.clone(),
            size: self.size,
            print_type: self.print_type,
        }
    }
}
