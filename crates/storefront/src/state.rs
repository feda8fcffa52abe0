//! Per-session storefront state.
//!
//! One [`StorefrontState`] owns one cart and one wishlist, both backed by the
//! same key-value store. Construct it explicitly; there is no global instance.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use gallery_core::{CurrencyCode, Price};

use crate::cart::CartStore;
use crate::checkout::{CheckoutSnapshot, PaymentLineItem};
use crate::config::{StorageBackend, StorefrontConfig};
use crate::error::{AppError, Result};
use crate::persistence::{FileStore, KeyValueStore, MemoryStore};
use crate::wishlist::WishlistStore;

/// Everything the external checkout routine needs to open a payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutPayload {
    pub currency: CurrencyCode,
    pub snapshot: CheckoutSnapshot,
    pub line_items: Vec<PaymentLineItem>,
    /// Display string for the subtotal.
    pub subtotal: String,
}

pub struct StorefrontState {
    config: StorefrontConfig,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl StorefrontState {
    /// Open storage per `config` and rehydrate both stores.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the data directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => Arc::new(FileStore::open(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        tracing::debug!(storage = ?config.storage, "Opening storefront state");

        Ok(Self::with_store(config, store))
    }

    /// Rehydrate both stores from `store`.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cart: CartStore::open_in(store.clone()),
            wishlist: WishlistStore::open_in(store),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Format an amount in the configured currency.
    #[must_use]
    pub fn format_price(&self, amount: Decimal) -> String {
        Price::new(amount, self.config.currency).display()
    }

    /// Snapshot the cart and convert it for the payment provider.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmptyCart` when there is nothing to buy and
    /// `AppError::Price` if a price cannot be expressed in minor units.
    pub fn checkout_payload(&self) -> Result<CheckoutPayload> {
        let snapshot = self.cart.checkout_snapshot();
        if snapshot.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let currency = self.config.currency;
        let line_items = snapshot.payment_line_items(currency)?;
        tracing::info!(
            lines = snapshot.lines.len(),
            quantity = snapshot.total_quantity,
            subtotal = %snapshot.subtotal,
            "Prepared checkout payload"
        );

        Ok(CheckoutPayload {
            currency,
            subtotal: self.format_price(snapshot.subtotal),
            snapshot,
            line_items,
        })
    }
}

impl std::fmt::Debug for StorefrontState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontState")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{ArtworkSummary, CartItem};

    fn memory_config() -> StorefrontConfig {
        StorefrontConfig {
            storage: StorageBackend::Memory,
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_checkout_payload_rejects_empty_cart() {
        let state = StorefrontState::open(memory_config()).unwrap();
        assert!(matches!(state.checkout_payload(), Err(AppError::EmptyCart)));
    }

    #[test]
    fn test_checkout_payload() {
        let mut state = StorefrontState::open(memory_config()).unwrap();
        let artwork = ArtworkSummary::new("A", "Estuary", "J. Hale").with_price(Decimal::from(1000));
        state
            .cart_mut()
            .add_item(CartItem::original(&artwork).unwrap(), 2);

        let payload = state.checkout_payload().unwrap();
        assert_eq!(payload.subtotal, "£2000");
        assert_eq!(payload.line_items.len(), 1);
        assert_eq!(payload.snapshot.total_quantity, 2);
    }

    #[test]
    fn test_file_backend_shares_directory_between_stores() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };

        let mut state = StorefrontState::open(config.clone()).unwrap();
        let artwork = ArtworkSummary::new("A", "Estuary", "J. Hale").with_price(Decimal::from(10));
        state
            .cart_mut()
            .add_item(CartItem::original(&artwork).unwrap(), 1);
        state
            .wishlist_mut()
            .add_item(crate::models::WishlistEntry::original(&artwork));

        assert!(dir.path().join("gallery-cart.json").exists());
        assert!(dir.path().join("gallery-wishlist.json").exists());

        let reopened = StorefrontState::open(config).unwrap();
        assert_eq!(reopened.cart().total_item_count(), 1);
        assert_eq!(reopened.wishlist().len(), 1);
    }
}
