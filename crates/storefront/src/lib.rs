//! Gallery Storefront - cart and wishlist state.
//!
//! This crate holds the visitor-side state of the gallery storefront as a
//! library, so it can be driven by any front end and tested in isolation.
//!
//! # Modules
//!
//! - [`cart`] - Cart store: line items, quantities, totals
//! - [`wishlist`] - Wishlist store: saved originals and print configurations
//! - [`checkout`] - Snapshot handed to the external checkout flow
//! - [`persistence`] - Repository port, key-value backends, on-disk records
//! - [`state`] - Per-session container wiring both stores to one backend
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod state;
pub mod wishlist;

pub use cart::CartStore;
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::StorefrontState;
pub use wishlist::WishlistStore;
