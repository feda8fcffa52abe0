//! Gallery Core - Shared domain types.
//!
//! This crate provides the types used across the gallery storefront components:
//! - `storefront` - Cart and wishlist stores with their persistence boundary
//! - `cli` - Command-line driver for the stores
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Artwork IDs, prices, availability, print configurations and item keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
