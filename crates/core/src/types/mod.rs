//! Core types for the gallery storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod key;
pub mod price;
pub mod print;
pub mod status;

pub use id::*;
pub use key::{ItemKey, ItemKind, KeyError, compose_print_id};
pub use price::{CurrencyCode, Price, PriceError, round_to_whole_units};
pub use print::{
    PriceRow, PrintCodeError, PrintSelection, PrintSize, PrintType, format_print_title,
    price_for_configuration, price_table,
};
pub use status::Availability;
