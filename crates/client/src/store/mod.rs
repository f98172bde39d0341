//! Local persisted state: the mirror and the stores built on it.
//!
//! # Architecture
//!
//! The [`Mirror`] is a JSON file-per-key store under the configured state
//! directory. Each store (cart, favorites, session, checkout drafts) keeps
//! an in-memory copy for the running process and writes the full value back
//! through the mirror on every mutation. The mirror is the durable copy;
//! memory is a cache.
//!
//! Anything unreadable in the mirror - missing file, I/O failure, malformed
//! JSON - loads as absent. The rest of the client assumes loads never fail
//! hard, so that contract is load-bearing.
//!
//! There is no cross-process coordination: two processes sharing a state
//! directory overwrite each other's slots, last write wins.

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod session;

pub use cart::{CartLine, CartStore, CartTotals};
pub use checkout::CheckoutDraftStore;
pub use favorites::{FavoriteEntry, FavoritesStore};
pub use session::SessionStore;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when writing persisted state.
///
/// Reads never error - see [`Mirror::load`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on state slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("Serialize error on state slot '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage slot names.
///
/// One slot per concern; no write ever spans two slots.
pub mod keys {
    /// Cart lines.
    pub const CART: &str = "cart";

    /// Favorite entries.
    pub const FAVORITES: &str = "favorites";

    /// The authenticated session, token included.
    pub const USER: &str = "user";

    /// Shipping address draft from the checkout flow.
    pub const SHIPPING: &str = "shipping";

    /// Payment method draft from the checkout flow.
    pub const PAYMENT_METHOD: &str = "paymentMethod";
}

/// JSON file-per-key persistent store.
///
/// Cheap to clone; clones share the same directory.
#[derive(Debug, Clone)]
pub struct Mirror {
    dir: Arc<PathBuf>,
}

impl Mirror {
    /// Open a mirror rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir: Arc::new(dir) })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the value stored under `key`.
    ///
    /// A missing slot, an unreadable file, or malformed JSON all yield
    /// `None`; the condition is logged, never surfaced. Callers fall back
    /// to their empty default.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read state slot, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed state slot, treating as absent");
                None
            }
        }
    }

    /// Replace the value stored under `key` with a fresh serialization of
    /// `value`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_owned(),
            source,
        })?;

        std::fs::write(self.path_for(key), json).map_err(|source| StoreError::Io {
            key: key.to_owned(),
            source,
        })
    }

    /// Delete the slot for `key`. Removing an absent slot is a no-op.
    pub fn remove(&self, key: &str) {
        if let Err(e) = std::fs::remove_file(self.path_for(key)) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, error = %e, "failed to remove state slot");
            }
        }
    }
}

/// Mutation listeners for a store.
///
/// Stores notify after every successful mutation so a front end can
/// re-render from fresh state.
#[derive(Default)]
pub(crate) struct Subscribers {
    listeners: Mutex<Vec<Box<dyn Fn() + Send + Sync>>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    pub(crate) fn notify(&self) {
        for listener in self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            listener();
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Subscribers").field("count", &count).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_mirror() -> (tempfile::TempDir, Mirror) {
        let dir = tempfile::tempdir().unwrap();
        let mirror = Mirror::open(dir.path()).unwrap();
        (dir, mirror)
    }

    #[test]
    fn test_load_absent_slot() {
        let (_dir, mirror) = temp_mirror();
        assert_eq!(mirror.load::<Vec<String>>("nothing"), None);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, mirror) = temp_mirror();
        let value = vec!["a".to_owned(), "b".to_owned()];
        mirror.save("slot", &value).unwrap();
        assert_eq!(mirror.load::<Vec<String>>("slot"), Some(value));
    }

    #[test]
    fn test_malformed_slot_is_absent() {
        let (dir, mirror) = temp_mirror();
        std::fs::write(dir.path().join("slot.json"), "{not json").unwrap();
        assert_eq!(mirror.load::<Vec<String>>("slot"), None);
    }

    #[test]
    fn test_wrong_shape_is_absent() {
        let (_dir, mirror) = temp_mirror();
        mirror.save("slot", &42_u32).unwrap();
        // Valid JSON of the wrong shape also falls back to absent.
        assert_eq!(mirror.load::<Vec<String>>("slot"), None);
    }

    #[test]
    fn test_remove_absent_slot_is_noop() {
        let (_dir, mirror) = temp_mirror();
        mirror.remove("nothing");
    }

    #[test]
    fn test_remove_deletes_slot() {
        let (_dir, mirror) = temp_mirror();
        mirror.save("slot", &1_u32).unwrap();
        mirror.remove("slot");
        assert_eq!(mirror.load::<u32>("slot"), None);
    }

    #[test]
    fn test_save_overwrites_whole_value() {
        let (_dir, mirror) = temp_mirror();
        mirror.save("slot", &vec![1, 2, 3]).unwrap();
        mirror.save("slot", &vec![9]).unwrap();
        assert_eq!(mirror.load::<Vec<i32>>("slot"), Some(vec![9]));
    }

    #[test]
    fn test_subscribers_notify() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let subs = Subscribers::default();
        let count = Arc::new(AtomicU32::new(0));
        let count_in = Arc::clone(&count);
        subs.subscribe(move || {
            count_in.fetch_add(1, Ordering::SeqCst);
        });

        subs.notify();
        subs.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
