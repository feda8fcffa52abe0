//! Durable storage for the cart and wishlist.
//!
//! # Layers
//!
//! - [`KeyValueStore`] - string slots addressed by a fixed key ([`FileStore`], [`MemoryStore`])
//! - [`StateRepository`] - the port a store talks to: `load` and `save` a whole state
//! - [`KeyValueRepository`] - the repository over a key-value slot, wrapping the
//!   state in a versioned JSON envelope: `{"state": ..., "version": N}`
//!
//! Stores never see a storage failure. Missing or corrupt data rehydrates as an
//! empty store; a failed write switches the store to memory-only for the rest
//! of its lifetime.

mod file;
mod memory;
pub mod records;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{PersistedCart, PersistedWishlist};

/// Errors from the storage backends and the JSON envelope.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload was written by a newer schema than this build understands.
    #[error("unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Slot key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String slots addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing a missing slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A state shape that lives in one versioned slot.
pub trait Persisted: Serialize + DeserializeOwned {
    /// Slot key.
    const STORAGE_KEY: &'static str;
    /// Schema version written by this build.
    const VERSION: u32;

    /// Upgrade a state read from an older (or equal) schema version.
    ///
    /// Must be idempotent: migrating already-current data is a no-op.
    #[must_use]
    fn migrate(self, from_version: u32) -> Self {
        let _ = from_version;
        self
    }
}

/// Port between a store and its durable state.
pub trait StateRepository<S> {
    /// Read the persisted state. `Ok(None)` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be read or decoded.
    fn load(&self) -> Result<Option<S>, StorageError>;

    /// Replace the persisted state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be encoded or written.
    fn save(&self, state: &S) -> Result<(), StorageError>;
}

#[derive(Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    state: &'a S,
    version: u32,
}

/// [`StateRepository`] over one slot of a [`KeyValueStore`].
pub struct KeyValueRepository<S> {
    store: Arc<dyn KeyValueStore>,
    _state: PhantomData<fn() -> S>,
}

impl<S> KeyValueRepository<S> {
    /// Create a repository writing to `S::STORAGE_KEY` in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _state: PhantomData,
        }
    }
}

impl<S: Persisted> StateRepository<S> for KeyValueRepository<S> {
    #[instrument(skip(self), fields(key = S::STORAGE_KEY))]
    fn load(&self) -> Result<Option<S>, StorageError> {
        let Some(raw) = self.store.get(S::STORAGE_KEY)? else {
            return Ok(None);
        };

        let envelope: Envelope<S> = serde_json::from_str(&raw)?;
        if envelope.version > S::VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: envelope.version,
                supported: S::VERSION,
            });
        }
        if envelope.version < S::VERSION {
            tracing::info!(
                from = envelope.version,
                to = S::VERSION,
                "Migrating persisted state"
            );
        }

        Ok(Some(envelope.state.migrate(envelope.version)))
    }

    #[instrument(skip(self, state), fields(key = S::STORAGE_KEY))]
    fn save(&self, state: &S) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&EnvelopeRef {
            state,
            version: S::VERSION,
        })?;
        self.store.set(S::STORAGE_KEY, &raw)
    }
}

/// A store's handle on its repository, with the degrade-to-memory policy.
pub(crate) struct Persistence<S> {
    repository: Option<Box<dyn StateRepository<S>>>,
}

impl<S: Persisted> Persistence<S> {
    pub(crate) fn durable(repository: Box<dyn StateRepository<S>>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    pub(crate) const fn memory_only() -> Self {
        Self { repository: None }
    }

    pub(crate) const fn is_durable(&self) -> bool {
        self.repository.is_some()
    }

    /// Persisted state, or `None` when there is nothing usable to restore.
    pub(crate) fn restore(&self) -> Option<S> {
        let repository = self.repository.as_ref()?;
        match repository.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    key = S::STORAGE_KEY,
                    error = %e,
                    "Discarding unreadable persisted state"
                );
                None
            }
        }
    }

    /// Write `state`; on failure stop persisting for the rest of the session.
    pub(crate) fn persist(&mut self, state: &S) {
        let Some(repository) = self.repository.as_ref() else {
            return;
        };

        if let Err(e) = repository.save(state) {
            tracing::warn!(
                key = S::STORAGE_KEY,
                error = %e,
                "Persisting failed, continuing in memory only"
            );
            self.repository = None;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
        #[serde(default)]
        upgraded: bool,
    }

    impl Persisted for Counter {
        const STORAGE_KEY: &'static str = "counter";
        const VERSION: u32 = 2;

        fn migrate(mut self, from_version: u32) -> Self {
            if from_version < 2 {
                self.upgraded = true;
            }
            self
        }
    }

    fn repository() -> (Arc<MemoryStore>, KeyValueRepository<Counter>) {
        let store = Arc::new(MemoryStore::new());
        let repository = KeyValueRepository::new(store.clone() as Arc<dyn KeyValueStore>);
        (store, repository)
    }

    #[test]
    fn test_load_missing_slot_is_none() {
        let (_, repository) = repository();
        assert!(repository.load().unwrap().is_none());
    }

    #[test]
    fn test_save_writes_versioned_envelope() {
        let (store, repository) = repository();
        repository
            .save(&Counter {
                value: 3,
                upgraded: false,
            })
            .unwrap();

        let raw = store.get("counter").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 2);
        assert_eq!(json["state"]["value"], 3);
    }

    #[test]
    fn test_load_migrates_older_version() {
        let (store, repository) = repository();
        store
            .set("counter", r#"{"state":{"value":7},"version":1}"#)
            .unwrap();

        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(
            loaded,
            Counter {
                value: 7,
                upgraded: true
            }
        );
    }

    #[test]
    fn test_load_without_version_is_version_zero() {
        let (store, repository) = repository();
        store.set("counter", r#"{"state":{"value":1}}"#).unwrap();

        assert!(repository.load().unwrap().unwrap().upgraded);
    }

    #[test]
    fn test_load_rejects_newer_version() {
        let (store, repository) = repository();
        store
            .set("counter", r#"{"state":{"value":1},"version":9}"#)
            .unwrap();

        assert!(matches!(
            repository.load(),
            Err(StorageError::UnsupportedVersion {
                found: 9,
                supported: 2
            })
        ));
    }

    #[test]
    fn test_load_corrupt_payload_is_json_error() {
        let (store, repository) = repository();
        store.set("counter", "{not json").unwrap();

        assert!(matches!(repository.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_restore_swallows_corrupt_payload() {
        let (store, repository) = repository();
        store.set("counter", "garbage").unwrap();

        let persistence = Persistence::<Counter>::durable(Box::new(repository));
        assert!(persistence.restore().is_none());
        assert!(persistence.is_durable());
    }

    struct ReadOnly;

    impl StateRepository<Counter> for ReadOnly {
        fn load(&self) -> Result<Option<Counter>, StorageError> {
            Ok(None)
        }

        fn save(&self, _state: &Counter) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }
    }

    #[test]
    fn test_persist_failure_degrades_to_memory_only() {
        let mut persistence = Persistence::<Counter>::durable(Box::new(ReadOnly));
        persistence.persist(&Counter::default());
        assert!(!persistence.is_durable());

        // Further writes are skipped silently.
        persistence.persist(&Counter::default());
        assert!(!persistence.is_durable());
    }
}
