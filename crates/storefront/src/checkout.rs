//! Checkout handoff.
//!
//! The checkout flow itself (pending order record, hosted payment session,
//! redirect) lives outside this crate. What it gets from here is an owned
//! [`CheckoutSnapshot`] of the cart, and the line items in the minor-unit form
//! a hosted payment page expects.
//!
//! Prices are taken from the cart as recorded; nothing is re-validated against
//! the catalog and the cart is not locked while checkout is in flight.

use rust_decimal::Decimal;
use serde::Serialize;

use gallery_core::{CurrencyCode, Price, PriceError};

use crate::models::CartLine;

/// One cart line as seen by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_url: Option<String>,
    pub line_total: Decimal,
}

/// Read-only copy of the cart taken when checkout starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSnapshot {
    pub lines: Vec<CheckoutLine>,
    pub total_quantity: u64,
    pub subtotal: Decimal,
}

/// A line item in a payment provider's session request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLineItem {
    pub name: String,
    pub description: String,
    /// Price per unit in minor units (e.g. pence).
    pub unit_amount: i64,
    /// Lower-case ISO 4217 code.
    pub currency: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl CheckoutSnapshot {
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let lines: Vec<CheckoutLine> = lines
            .iter()
            .map(|line| CheckoutLine {
                id: line.item.key.to_string(),
                title: line.item.title.clone(),
                artist: line.item.artist.clone(),
                unit_price: line.item.price,
                quantity: line.quantity,
                image_url: line.item.image_url.clone(),
                line_total: line.line_total(),
            })
            .collect();

        Self {
            total_quantity: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal: lines
                .iter()
                .map(|line| line.line_total)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            lines,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Convert every line for a payment session in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if a unit price cannot be expressed in
    /// minor units.
    pub fn payment_line_items(
        &self,
        currency: CurrencyCode,
    ) -> Result<Vec<PaymentLineItem>, PriceError> {
        self.lines
            .iter()
            .map(|line| {
                Ok(PaymentLineItem {
                    name: line.title.clone(),
                    description: format!("by {}", line.artist),
                    unit_amount: Price::new(line.unit_price, currency).minor_units()?,
                    currency: currency.code().to_ascii_lowercase(),
                    quantity: line.quantity,
                    images: line.image_url.iter().cloned().collect(),
                })
            })
            .collect()
    }
}
