//! Checkout draft slots: shipping address and payment method.
//!
//! Each slot is read and written independently through the mirror; nothing
//! validates one against the other and no write spans both. A checkout
//! that submits shipping and then walks away leaves the shipping draft
//! behind with no expiry - drafts only go away via [`CheckoutDraftStore::clear`]
//! after a successful placement, or an explicit reset.

use bramblefig_core::PaymentMethod;

use crate::models::ShippingAddress;
use crate::store::{Mirror, StoreError, keys};

/// Mirror-backed checkout draft slots.
#[derive(Debug, Clone)]
pub struct CheckoutDraftStore {
    mirror: Mirror,
}

impl CheckoutDraftStore {
    /// Create a draft store over `mirror`.
    ///
    /// Drafts are not cached in memory - they are written once per form
    /// submit and read once at order review, so every access goes to the
    /// mirror.
    #[must_use]
    pub const fn new(mirror: Mirror) -> Self {
        Self { mirror }
    }

    /// The staged shipping address, if one was submitted.
    #[must_use]
    pub fn shipping(&self) -> Option<ShippingAddress> {
        self.mirror.load(keys::SHIPPING)
    }

    /// Stage a shipping address.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn set_shipping(&self, address: &ShippingAddress) -> Result<(), StoreError> {
        self.mirror.save(keys::SHIPPING, address)
    }

    /// The staged payment method, if one was chosen.
    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.mirror.load(keys::PAYMENT_METHOD)
    }

    /// Stage a payment method.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn set_payment_method(&self, method: PaymentMethod) -> Result<(), StoreError> {
        self.mirror.save(keys::PAYMENT_METHOD, &method)
    }

    /// Drop both draft slots.
    pub fn clear(&self) {
        self.mirror.remove(keys::SHIPPING);
        self.mirror.remove(keys::PAYMENT_METHOD);
    }
}
