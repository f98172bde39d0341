//! The favorites store: a toggled product set synchronized to the mirror.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramblefig_core::ProductId;

use crate::models::Product;
use crate::store::{Mirror, StoreError, Subscribers, keys};

/// A favorited product snapshot. Unique by product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteEntry {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl FavoriteEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
        }
    }
}

/// The favorites list, persisted whole on every mutation.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    inner: Arc<FavoritesStoreInner>,
}

#[derive(Debug)]
struct FavoritesStoreInner {
    mirror: Mirror,
    entries: Mutex<Vec<FavoriteEntry>>,
    subscribers: Subscribers,
}

impl FavoritesStore {
    /// Create a favorites store, hydrating from the mirror.
    #[must_use]
    pub fn new(mirror: Mirror) -> Self {
        let entries = mirror
            .load::<Vec<FavoriteEntry>>(keys::FAVORITES)
            .unwrap_or_default();
        Self {
            inner: Arc::new(FavoritesStoreInner {
                mirror,
                entries: Mutex::new(entries),
                subscribers: Subscribers::default(),
            }),
        }
    }

    /// Toggle `product` in the favorites list.
    ///
    /// Returns `true` when the product was added, `false` when it was
    /// removed. Callers use the flag for notification text only.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn toggle(&self, product: &Product) -> Result<bool, StoreError> {
        let mut entries = self.lock();

        let was_present = entries.iter().any(|e| e.id == product.id);
        if was_present {
            entries.retain(|e| e.id != product.id);
        } else {
            entries.push(FavoriteEntry::from_product(product));
        }

        self.inner.mirror.save(keys::FAVORITES, &*entries)?;
        drop(entries);
        self.inner.subscribers.notify();

        Ok(!was_present)
    }

    /// Pure membership test against the in-memory list.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.lock().iter().any(|e| &e.id == product_id)
    }

    /// Snapshot of the current entries.
    #[must_use]
    pub fn entries(&self) -> Vec<FavoriteEntry> {
        self.lock().clone()
    }

    /// Register a listener invoked after every successful mutation.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.inner.subscribers.subscribe(listener);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FavoriteEntry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
