//! Type-safe price representation using decimal arithmetic.
//!
//! Gallery prices are quoted in whole currency units (artworks and prints are
//! never priced in fractions). The payment provider wants integer minor units,
//! so [`Price::minor_units`] does that conversion at the checkout boundary.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when working with prices and currencies.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The currency code is not one the gallery sells in.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
    /// The amount cannot be represented in minor units.
    #[error("amount {0} cannot be expressed in minor units")]
    OutOfRange(Decimal),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., pounds, not pence).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Amount expressed in the currency's minor unit (e.g., pence).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the amount is negative or does not
    /// fit in an `i64` once scaled.
    pub fn minor_units(&self) -> Result<i64, PriceError> {
        let scale = Decimal::from(10_i64.pow(self.currency_code.minor_unit_exponent()));
        let scaled = self
            .amount
            .checked_mul(scale)
            .ok_or(PriceError::OutOfRange(self.amount))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        if scaled.is_sign_negative() && !scaled.is_zero() {
            return Err(PriceError::OutOfRange(self.amount));
        }

        scaled.to_i64().ok_or(PriceError::OutOfRange(self.amount))
    }

    /// Format for display (e.g., "£250" or "£19.50").
    #[must_use]
    pub fn display(&self) -> String {
        let symbol = self.currency_code.symbol();
        if self.amount.fract().is_zero() {
            format!("{symbol}{:.0}", self.amount)
        } else {
            format!("{symbol}{:.2}", self.amount)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round an amount to the nearest whole currency unit, halves away from zero.
#[must_use]
pub fn round_to_whole_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    USD,
    EUR,
    #[default]
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Upper-case ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Number of decimal digits in the minor unit.
    #[must_use]
    pub const fn minor_unit_exponent(&self) -> u32 {
        2
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnknownCurrency(s.to_string())),
        }
    }
}
