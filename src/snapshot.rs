//! Snapshot persistence: the key-value storage collaborator and the
//! serialized shape it holds.
//!
//! Persistence is best-effort. The in-memory state stays authoritative for
//! the session whatever the storage backend does; failures are logged and
//! swallowed by the [`Store`](crate::store::Store).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

use crate::state::{CartLine, Notification, WishlistEntry};

/// The three logical keys the store persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    /// Cart lines.
    Cart,
    /// Wishlist entries.
    Wishlist,
    /// Notification sequence.
    Notifications,
}

impl SnapshotKey {
    /// All keys, in persistence order.
    pub const ALL: [SnapshotKey; 3] = [
        SnapshotKey::Cart,
        SnapshotKey::Wishlist,
        SnapshotKey::Notifications,
    ];

    /// The stable storage-key string.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            SnapshotKey::Cart => "techbeam-cart",
            SnapshotKey::Wishlist => "techbeam-wishlist",
            SnapshotKey::Notifications => "techbeam-notifications",
        }
    }
}

/// Errors a storage backend may raise.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The backend refused the read or write (quota, unavailable, ...).
    #[error("storage backend failed for key {key}: {reason}")]
    Backend {
        /// Storage key involved.
        key: &'static str,
        /// Backend-specific reason.
        reason: String,
    },

    /// The payload could not be serialized or deserialized.
    #[error(transparent)]
    Codec(#[from] serde_json::Error),
}

/// A key-value string store holding one serialized JSON array per
/// [`SnapshotKey`]. Read once at startup, written after every mutation.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send {
    /// Read the raw payload for a key, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the backend cannot be read.
    fn load(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotError>;

    /// Write the raw payload for a key.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the backend rejects the write.
    fn save(&mut self, key: SnapshotKey, payload: &str) -> Result<(), SnapshotError>;
}

/// In-memory [`SnapshotStore`], the session-local stand-in for browser
/// local storage. Also the backend integration tests reopen stores against.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<&'static str, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to model a previous session's writes.
    pub fn seed(&mut self, key: SnapshotKey, payload: impl Into<String>) {
        self.entries.insert(key.storage_key(), payload.into());
    }

    /// Raw payload for a key, if present.
    #[must_use]
    pub fn raw(&self, key: SnapshotKey) -> Option<&str> {
        self.entries.get(key.storage_key()).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotError> {
        Ok(self.entries.get(key.storage_key()).cloned())
    }

    fn save(&mut self, key: SnapshotKey, payload: &str) -> Result<(), SnapshotError> {
        self.entries.insert(key.storage_key(), payload.to_owned());
        Ok(())
    }
}

/// A cloneable handle to one [`MemoryStore`], so a later session (or a
/// test) can reopen a store against the same backing map.
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryStore {
    inner: std::sync::Arc<std::sync::Mutex<MemoryStore>>,
}

impl SharedMemoryStore {
    /// Creates an empty shared store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw payload for a key, if present.
    #[must_use]
    pub fn raw(&self, key: SnapshotKey) -> Option<String> {
        self.lock().raw(key).map(ToOwned::to_owned)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStore> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SnapshotStore for SharedMemoryStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotError> {
        self.lock().load(key)
    }

    fn save(&mut self, key: SnapshotKey, payload: &str) -> Result<(), SnapshotError> {
        self.lock().save(key, payload)
    }
}

/// The restorable slice of session state. The user profile is deliberately
/// absent: it never round-trips through storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cart lines.
    pub cart: Vec<CartLine>,

    /// Wishlist entries.
    pub wishlist: Vec<WishlistEntry>,

    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
}

/// Decode one stored array, falling back to `default` when the key is
/// absent or its payload does not parse.
pub(crate) fn decode_or<T: DeserializeOwned>(
    key: SnapshotKey,
    raw: Option<String>,
    default: Vec<T>,
) -> Vec<T> {
    match raw {
        None => default,
        Some(payload) => match serde_json::from_str(&payload) {
            Ok(values) => values,
            Err(error) => {
                let error = SnapshotError::from(error);
                warn!(key = key.storage_key(), %error, "discarding malformed snapshot");
                default
            }
        },
    }
}
