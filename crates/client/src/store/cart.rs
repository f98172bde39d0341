//! The cart store: merge-by-id lines synchronized to the mirror.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramblefig_core::{ProductId, round_money};

use crate::models::Product;
use crate::store::{Mirror, StoreError, Subscribers, keys};

/// Tax rate applied by the cart summary view (8%).
#[must_use]
pub fn cart_summary_tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Tax rate applied at order review and placement (15%).
///
/// TODO: the cart summary and the order review disagree on the tax rate
/// (8% vs 15%); both shipped values are kept at their call sites until
/// product decides which one is right.
#[must_use]
pub fn checkout_tax_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Subtotal above which the flat shipping fee is waived. Strictly above -
/// a subtotal of exactly 100 still pays shipping.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::from(100)
}

/// Flat shipping fee charged below the free-shipping threshold.
#[must_use]
pub fn flat_shipping_fee() -> Decimal {
    Decimal::from(10)
}

/// One line in the cart, keyed by product id.
///
/// Name, image, and price are snapshotted when the line is first created
/// and never refreshed from the catalog - a repeat add only bumps the
/// quantity, so the price the customer first saw is the price they keep
/// until the line is removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Id of the product this line holds.
    pub product: ProductId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub qty: u32,
}

impl CartLine {
    fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            qty,
        }
    }
}

/// Derived cart totals. Computed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals for a set of lines at the given tax rate.
    ///
    /// Shipping is a flat fee, waived when the subtotal is strictly above
    /// the free-shipping threshold. Tax and total round to cents.
    #[must_use]
    pub fn compute(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = lines
            .iter()
            .map(|line| Decimal::from(line.qty) * line.price)
            .sum();

        let shipping = if subtotal > free_shipping_threshold() {
            Decimal::ZERO
        } else {
            flat_shipping_fee()
        };

        let tax = round_money(subtotal * tax_rate);
        let total = round_money(subtotal + shipping + tax);

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }
}

/// The cart: an in-memory line list synchronized to the mirror on every
/// mutation.
///
/// Cheaply cloneable; clones share state. Lines are unique by product id.
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Debug)]
struct CartStoreInner {
    mirror: Mirror,
    lines: Mutex<Vec<CartLine>>,
    subscribers: Subscribers,
}

impl CartStore {
    /// Create a cart store, hydrating from the mirror.
    #[must_use]
    pub fn new(mirror: Mirror) -> Self {
        let lines = mirror.load::<Vec<CartLine>>(keys::CART).unwrap_or_default();
        Self {
            inner: Arc::new(CartStoreInner {
                mirror,
                lines: Mutex::new(lines),
                subscribers: Subscribers::default(),
            }),
        }
    }

    /// Add `qty` units of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is bumped and
    /// its snapshotted fields are left untouched; otherwise a new line is
    /// appended. The full list is persisted afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_item(&self, product: &Product, qty: u32) -> Result<(), StoreError> {
        self.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product == product.id) {
                line.qty += qty;
            } else {
                lines.push(CartLine::from_product(product, qty));
            }
        })
    }

    /// Set a line's quantity to exactly `qty`.
    ///
    /// Callers own the ≥ 1 clamp; the store writes what it is given. An
    /// unknown product id is a no-op (still persisted).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn set_quantity(&self, product_id: &ProductId, qty: u32) -> Result<(), StoreError> {
        self.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| &l.product == product_id) {
                line.qty = qty;
            }
        })
    }

    /// Remove the line for `product_id`, leaving every other line intact.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<(), StoreError> {
        self.mutate(|lines| {
            lines.retain(|l| &l.product != product_id);
        })
    }

    /// Bulk-overwrite the cart with `lines` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn replace(&self, new_lines: Vec<CartLine>) -> Result<(), StoreError> {
        self.mutate(|lines| {
            *lines = new_lines;
        })
    }

    /// Empty the cart and drop its persisted slot entirely.
    ///
    /// Used after order placement: the slot is removed, not rewritten as
    /// an empty list.
    pub fn clear(&self) {
        let mut lines = self.lock();
        lines.clear();
        drop(lines);
        self.inner.mirror.remove(keys::CART);
        self.inner.subscribers.notify();
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().clone()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total unit count across all lines (the cart badge number).
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lock().iter().map(|l| l.qty).sum()
    }

    /// Compute totals for the current lines at `tax_rate`.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        CartTotals::compute(&self.lock(), tax_rate)
    }

    /// Register a listener invoked after every successful mutation.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.inner.subscribers.subscribe(listener);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CartLine>> {
        self.inner
            .lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-modify-write-persist in one step, holding the lock throughout
    /// so merged-line invariants hold under any interleaving.
    fn mutate(&self, f: impl FnOnce(&mut Vec<CartLine>)) -> Result<(), StoreError> {
        let mut lines = self.lock();
        f(&mut lines);
        self.inner.mirror.save(keys::CART, &*lines)?;
        drop(lines);
        self.inner.subscribers.notify();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mirror() -> (tempfile::TempDir, Mirror) {
        let dir = tempfile::tempdir().unwrap();
        let mirror = Mirror::open(dir.path()).unwrap();
        (dir, mirror)
    }

    fn product(id: &str, price: u32) -> Product {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": format!("Product {id}"),
            "image": format!("/images/{id}.jpg"),
            "price": price,
            "countInStock": 10
        }))
        .unwrap()
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);
        let p = product("p1", 10);

        cart.add_item(&p, 1).unwrap();
        cart.add_item(&p, 2).unwrap();

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 3);
    }

    #[test]
    fn test_merge_preserves_snapshot_price() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);

        cart.add_item(&product("p1", 10), 1).unwrap();
        // Catalog price changed between adds; the line keeps the first one.
        cart.add_item(&product("p1", 25), 1).unwrap();

        let lines = cart.lines();
        assert_eq!(lines[0].price, Decimal::from(10));
        assert_eq!(lines[0].qty, 2);
    }

    #[test]
    fn test_remove_leaves_other_lines_untouched() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);
        cart.add_item(&product("p1", 10), 2).unwrap();
        cart.add_item(&product("p2", 5), 1).unwrap();

        cart.remove_item(&ProductId::new("p1")).unwrap();

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product, ProductId::new("p2"));
        assert_eq!(lines[0].qty, 1);
    }

    #[test]
    fn test_set_quantity_exact() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);
        cart.add_item(&product("p1", 10), 1).unwrap();

        cart.set_quantity(&ProductId::new("p1"), 7).unwrap();
        assert_eq!(cart.lines()[0].qty, 7);

        // Unknown id is a no-op
        cart.set_quantity(&ProductId::new("ghost"), 3).unwrap();
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_persists_across_reload() {
        let (_dir, mirror) = mirror();
        {
            let cart = CartStore::new(mirror.clone());
            cart.add_item(&product("p1", 10), 2).unwrap();
        }

        // Fresh store over the same mirror: hydrates the identical list.
        let reloaded = CartStore::new(mirror);
        let lines = reloaded.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product, ProductId::new("p1"));
        assert_eq!(lines[0].qty, 2);
        assert_eq!(lines[0].price, Decimal::from(10));
    }

    #[test]
    fn test_clear_removes_persisted_slot() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror.clone());
        cart.add_item(&product("p1", 10), 1).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(mirror.load::<Vec<CartLine>>(keys::CART), None);
    }

    #[test]
    fn test_totals_at_cart_summary_rate() {
        let lines = vec![
            CartLine {
                product: ProductId::new("p1"),
                name: "A".to_owned(),
                image: "/a.jpg".to_owned(),
                price: Decimal::from(10),
                qty: 2,
            },
            CartLine {
                product: ProductId::new("p2"),
                name: "B".to_owned(),
                image: "/b.jpg".to_owned(),
                price: Decimal::from(5),
                qty: 1,
            },
        ];

        let totals = CartTotals::compute(&lines, cart_summary_tax_rate());
        assert_eq!(totals.subtotal, Decimal::from(25));
        assert_eq!(totals.tax, Decimal::new(200, 2));
        assert_eq!(totals.shipping, Decimal::from(10));
        assert_eq!(totals.total, Decimal::new(3700, 2));
    }

    #[test]
    fn test_totals_at_checkout_rate() {
        let lines = vec![
            CartLine {
                product: ProductId::new("p1"),
                name: "A".to_owned(),
                image: "/a.jpg".to_owned(),
                price: Decimal::from(10),
                qty: 2,
            },
            CartLine {
                product: ProductId::new("p2"),
                name: "B".to_owned(),
                image: "/b.jpg".to_owned(),
                price: Decimal::from(5),
                qty: 1,
            },
        ];

        let totals = CartTotals::compute(&lines, checkout_tax_rate());
        assert_eq!(totals.tax, Decimal::new(375, 2));
        assert_eq!(totals.total, Decimal::new(3875, 2));
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        let line = |price| CartLine {
            product: ProductId::new("p1"),
            name: "A".to_owned(),
            image: "/a.jpg".to_owned(),
            price,
            qty: 1,
        };

        // Exactly 100 still pays the fee
        let at = CartTotals::compute(&[line(Decimal::from(100))], cart_summary_tax_rate());
        assert_eq!(at.shipping, Decimal::from(10));

        // Strictly above 100 ships free
        let above = CartTotals::compute(&[line(Decimal::new(10001, 2))], cart_summary_tax_rate());
        assert_eq!(above.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = CartTotals::compute(&[], cart_summary_tax_rate());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        // An empty cart still quotes the flat fee; placement is blocked
        // upstream before it matters.
        assert_eq!(totals.shipping, Decimal::from(10));
        assert_eq!(totals.total, Decimal::from(10));
    }

    #[test]
    fn test_subscriber_fires_on_mutation() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);
        let count = Arc::new(AtomicU32::new(0));
        let count_in = Arc::clone(&count);
        cart.subscribe(move || {
            count_in.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(&product("p1", 10), 1).unwrap();
        cart.set_quantity(&ProductId::new("p1"), 2).unwrap();
        cart.clear();

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unit_count() {
        let (_dir, mirror) = mirror();
        let cart = CartStore::new(mirror);
        cart.add_item(&product("p1", 10), 2).unwrap();
        cart.add_item(&product("p2", 5), 3).unwrap();
        assert_eq!(cart.unit_count(), 5);
    }
}
