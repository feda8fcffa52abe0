//! Wishlist store.
//!
//! A deduplicated, insertion-ordered set of saved originals and print
//! configurations, keyed by [`ItemKey`]. Adding an entry that is already
//! saved does nothing.
//!
//! The "last added" marker drives a short-lived highlight in the UI. It is an
//! expiring value: the store records when the entry went in, and
//! [`WishlistStore::last_added`] answers against the caller's clock.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use gallery_core::{ArtworkId, ItemKey, ItemKind};

use crate::models::WishlistEntry;
use crate::persistence::{
    KeyValueRepository, KeyValueStore, PersistedWishlist, Persistence, StateRepository,
};

/// How long the last-added marker stays fresh.
pub const LAST_ADDED_TTL_SECS: i64 = 3;

#[derive(Debug, Clone)]
struct LastAdded {
    key: ItemKey,
    at: DateTime<Utc>,
}

pub struct WishlistStore {
    entries: Vec<WishlistEntry>,
    is_open: bool,
    last_added: Option<LastAdded>,
    persistence: Persistence<PersistedWishlist>,
}

impl WishlistStore {
    /// Wishlist that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            is_open: false,
            last_added: None,
            persistence: Persistence::memory_only(),
        }
    }

    /// Rehydrate from `repository`, migrating older schemas.
    #[must_use]
    pub fn load(repository: impl StateRepository<PersistedWishlist> + 'static) -> Self {
        let persistence = Persistence::<PersistedWishlist>::durable(Box::new(repository));
        let entries = persistence
            .restore()
            .map(PersistedWishlist::into_entries)
            .unwrap_or_default();

        tracing::info!(entries = entries.len(), "Wishlist rehydrated");

        Self {
            entries,
            is_open: false,
            last_added: None,
            persistence,
        }
    }

    /// Rehydrate from the wishlist slot of `store`.
    #[must_use]
    pub fn open_in(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load(KeyValueRepository::<PersistedWishlist>::new(store))
    }

    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistence.is_durable()
    }

    /// Save `entry` unless its id is already present. Returns whether it was added.
    pub fn add_item(&mut self, entry: WishlistEntry) -> bool {
        self.add_item_at(entry, Utc::now())
    }

    /// [`add_item`](Self::add_item) with an explicit insertion time for the marker.
    pub fn add_item_at(&mut self, entry: WishlistEntry, now: DateTime<Utc>) -> bool {
        let key = entry.key();
        if key.artwork_id().is_empty() {
            tracing::debug!("Ignoring wishlist entry with empty id");
            return false;
        }
        if self.is_in_wishlist(&key) {
            tracing::debug!(id = %key, "Wishlist entry already saved");
            return false;
        }

        tracing::debug!(id = %key, kind = ?key.kind(), "Wishlist entry added");
        self.entries.push(entry);
        self.last_added = Some(LastAdded { key, at: now });
        self.save();
        true
    }

    /// Remove the entry for `key`. Absent keys are a no-op.
    pub fn remove_item(&mut self, key: &ItemKey) {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key() != key);
        if self.entries.len() == before {
            return;
        }

        if self.last_added.as_ref().is_some_and(|last| &last.key == key) {
            self.last_added = None;
        }
        tracing::debug!(id = %key, "Wishlist entry removed");
        self.save();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_added = None;
        tracing::debug!("Wishlist cleared");
        self.save();
    }

    #[must_use]
    pub fn is_in_wishlist(&self, key: &ItemKey) -> bool {
        self.entries.iter().any(|entry| &entry.key() == key)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn originals(&self) -> Vec<&WishlistEntry> {
        self.of_kind(ItemKind::Original)
    }

    #[must_use]
    pub fn prints(&self) -> Vec<&WishlistEntry> {
        self.of_kind(ItemKind::Print)
    }

    /// The saved original of `artwork_id` and every saved print of it.
    #[must_use]
    pub fn items_by_artwork(&self, artwork_id: &ArtworkId) -> Vec<&WishlistEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.artwork_id() == artwork_id)
            .collect()
    }

    /// The most recent successful insertion, while it is younger than
    /// [`LAST_ADDED_TTL_SECS`] at `now`.
    #[must_use]
    pub fn last_added(&self, now: DateTime<Utc>) -> Option<&ItemKey> {
        let last = self.last_added.as_ref()?;
        let age = now.signed_duration_since(last.at);
        (age >= TimeDelta::zero() && age < TimeDelta::seconds(LAST_ADDED_TTL_SECS))
            .then_some(&last.key)
    }

    // -------------------------------------------------------------------------
    // Panel visibility
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

    fn of_kind(&self, kind: ItemKind) -> Vec<&WishlistEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind() == kind)
            .collect()
    }

    fn save(&mut self) {
        let state = PersistedWishlist::from_entries(&self.entries);
        self.persistence.persist(&state);
    }
}

impl Default for WishlistStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("entries", &self.entries)
            .field("is_open", &self.is_open)
            .field("last_added", &self.last_added)
            .field("persistent", &self.is_persistent())
            .finish()
    }
}
