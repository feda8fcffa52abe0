//! Cart store.
//!
//! Holds the lines a visitor intends to buy and survives reloads through its
//! [`StateRepository`]. Every mutation is saved immediately; storage failures
//! never reach the caller.
//!
//! There is no locked or submitted state: checkout reads a snapshot and the
//! cart stays editable while the payment provider is involved.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use gallery_core::ItemKey;

use crate::checkout::CheckoutSnapshot;
use crate::models::{CartItem, CartLine};
use crate::persistence::{
    KeyValueRepository, KeyValueStore, PersistedCart, Persistence, StateRepository,
};

pub struct CartStore {
    lines: Vec<CartLine>,
    is_open: bool,
    persistence: Persistence<PersistedCart>,
}

impl CartStore {
    /// Cart that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            lines: Vec::new(),
            is_open: false,
            persistence: Persistence::memory_only(),
        }
    }

    /// Rehydrate from `repository`; unreadable data yields an empty cart.
    #[must_use]
    pub fn load(repository: impl StateRepository<PersistedCart> + 'static) -> Self {
        let persistence = Persistence::<PersistedCart>::durable(Box::new(repository));
        let lines = persistence
            .restore()
            .map(PersistedCart::into_lines)
            .unwrap_or_default();

        tracing::info!(lines = lines.len(), "Cart rehydrated");

        Self {
            lines,
            is_open: false,
            persistence,
        }
    }

    /// Rehydrate from the cart slot of `store`.
    #[must_use]
    pub fn open_in(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load(KeyValueRepository::<PersistedCart>::new(store))
    }

    /// Whether mutations are still being written to durable storage.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistence.is_durable()
    }

    /// Add `quantity` of `item`, merging into an existing line with the same id.
    ///
    /// A quantity of zero, or an item with an empty artwork id, is ignored.
    pub fn add_item(&mut self, item: CartItem, quantity: u32) {
        if quantity == 0 || item.key.artwork_id().is_empty() {
            tracing::debug!(id = %item.key, quantity, "Ignoring empty cart add");
            return;
        }

        if let Some(line) = self.line_mut(&item.key) {
            line.quantity = line.quantity.saturating_add(quantity);
            tracing::debug!(id = %item.key, quantity = line.quantity, "Cart line incremented");
        } else {
            tracing::debug!(id = %item.key, quantity, "Cart line added");
            self.lines.push(CartLine {
                item,
                quantity,
                added_at: Utc::now(),
            });
        }

        self.save();
    }

    /// Remove the line for `key`. Absent keys are a no-op.
    pub fn remove_item(&mut self, key: &ItemKey) {
        let before = self.lines.len();
        self.lines.retain(|line| &line.item.key != key);
        if self.lines.len() != before {
            tracing::debug!(id = %key, "Cart line removed");
            self.save();
        }
    }

    /// Replace the quantity for `key`; zero removes the line.
    pub fn update_quantity(&mut self, key: &ItemKey, quantity: u32) {
        if quantity == 0 {
            self.remove_item(key);
            return;
        }

        if let Some(line) = self.line_mut(key) {
            line.quantity = quantity;
            tracing::debug!(id = %key, quantity, "Cart quantity updated");
            self.save();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::debug!("Cart cleared");
        self.save();
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price × quantity, using the prices recorded on the lines.
    ///
    /// Saturates at the `Decimal` bounds instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    #[must_use]
    pub fn is_in_cart(&self, key: &ItemKey) -> bool {
        self.line(key).is_some()
    }

    /// Quantity for `key`, 0 when absent.
    #[must_use]
    pub fn quantity(&self, key: &ItemKey) -> u32 {
        self.line(key).map_or(0, |line| line.quantity)
    }

    /// Owned copy of the cart for the checkout flow.
    #[must_use]
    pub fn checkout_snapshot(&self) -> CheckoutSnapshot {
        CheckoutSnapshot::from_lines(&self.lines)
    }

    // -------------------------------------------------------------------------
    // Side panel visibility
    // -------------------------------------------------------------------------

    pub const fn open(&mut self) {
        self.is_open = true;
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    pub const fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    fn line(&self, key: &ItemKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item.key == key)
    }

    fn line_mut(&mut self, key: &ItemKey) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.item.key == key)
    }

    fn save(&mut self) {
        let state = PersistedCart::from_lines(&self.lines);
        self.persistence.persist(&state);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("is_open", &self.is_open)
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gallery_core::{ArtworkId, PrintSize, PrintType};

    use super::*;
    use crate::models::ArtworkSummary;
    use crate::persistence::MemoryStore;

    fn artwork(id: &str, price: i64) -> ArtworkSummary {
        ArtworkSummary::new(id, format!("Work {id}"), "Anon").with_price(Decimal::from(price))
    }

    fn item(id: &str, price: i64) -> CartItem {
        CartItem::original(&artwork(id, price)).unwrap()
    }

    fn key(id: &str) -> ItemKey {
        ItemKey::original(ArtworkId::new(id))
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = CartStore::in_memory();
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adding_same_item_merges_quantity() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 1000), 2);
        let added_at = cart.lines().first().unwrap().added_at;
        cart.add_item(item("A", 1000), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity(&key("A")), 5);
        assert_eq!(cart.lines().first().unwrap().added_at, added_at);
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 1000), 0);
        assert!(cart.is_empty());

        cart.add_item(item("A", 1000), 1);
        cart.add_item(item("A", 1000), 0);
        assert_eq!(cart.quantity(&key("A")), 1);
    }

    #[test]
    fn test_add_with_empty_id_is_ignored() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("", 10), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 1), u32::MAX);
        cart.add_item(item("A", 1), 5);
        assert_eq!(cart.quantity(&key("A")), u32::MAX);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 100), 4);
        cart.update_quantity(&key("A"), 1);
        assert_eq!(cart.quantity(&key("A")), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 100), 4);
        cart.update_quantity(&key("A"), 0);
        assert!(!cart.is_in_cart(&key("A")));
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = CartStore::in_memory();
        cart.update_quantity(&key("missing"), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 100), 1);
        cart.add_item(item("B", 200), 1);

        cart.remove_item(&key("A"));
        let after_first: Vec<_> = cart.lines().to_vec();
        cart.remove_item(&key("A"));
        cart.remove_item(&key("never-added"));

        assert_eq!(cart.lines(), after_first.as_slice());
    }

    #[test]
    fn test_totals_mix_originals_and_prints() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 1000), 1);
        cart.add_item(
            CartItem::print(&artwork("A", 1000), PrintSize::A3, PrintType::Canvas),
            2,
        );

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Decimal::from(1000 + 2 * 338));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::in_memory();
        for id in ["c", "a", "b"] {
            cart.add_item(item(id, 1), 1);
        }
        cart.add_item(item("a", 1), 1);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.item.key.to_string()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("A", 1), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_visibility_toggle() {
        let mut cart = CartStore::in_memory();
        assert!(!cart.is_open());
        cart.toggle();
        assert!(cart.is_open());
        cart.close();
        assert!(!cart.is_open());
        cart.open();
        cart.open();
        assert!(cart.is_open());
    }

    #[test]
    fn test_rehydrates_from_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let mut cart = CartStore::open_in(store.clone());
        cart.add_item(item("A", 1000), 2);
        cart.open();

        let reloaded = CartStore::open_in(store);
        assert_eq!(reloaded.lines(), cart.lines());
        // Visibility is not persisted.
        assert!(!reloaded.is_open());
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("gallery-cart", "][").unwrap();

        let cart = CartStore::open_in(store);
        assert!(cart.is_empty());
        assert!(cart.is_persistent());
    }

    #[test]
    fn test_original_with_print_shaped_id_shares_line_with_print() {
        let mut cart = CartStore::in_memory();
        cart.add_item(item("X-print-a3-paper", 100), 1);
        cart.add_item(
            CartItem::print(&artwork("X", 100), PrintSize::A3, PrintType::Paper),
            1,
        );

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity(&ItemKey::parse("X-print-a3-paper")), 2);

        cart.remove_item(&ItemKey::parse("X-print-a3-paper"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut cart = CartStore::in_memory();
        let huge = ArtworkSummary::new("big", "Big", "Anon").with_price(Decimal::MAX);
        cart.add_item(CartItem::original(&huge).unwrap(), 2);
        cart.add_item(item("small", 10), u32::MAX);

        assert_eq!(cart.lines()[0].line_total(), Decimal::MAX);
        assert_eq!(cart.total_price(), Decimal::MAX);
        assert_eq!(cart.checkout_snapshot().subtotal, Decimal::MAX);
    }
}
