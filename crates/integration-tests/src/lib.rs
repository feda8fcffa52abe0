//! Integration tests for the gallery storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gallery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart flows across originals and prints
//! - `wishlist_scenarios` - Saving, filtering and the last-added marker
//! - `persistence` - File-backed rehydration, legacy payloads, degraded storage
