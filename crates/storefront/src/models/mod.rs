//! Domain models held by the stores.
//!
//! - [`artwork`] - catalog snapshot supplied by callers
//! - [`cart`] - cart items and lines
//! - [`wishlist`] - saved originals and prints

pub mod artwork;
pub mod cart;
pub mod wishlist;

pub use artwork::ArtworkSummary;
pub use cart::{CartItem, CartLine, ItemDetails};
pub use wishlist::{SavedItem, WishlistEntry};
