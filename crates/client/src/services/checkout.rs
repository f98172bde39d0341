//! Checkout orchestration: review assembly and order placement.
//!
//! Ties the cart, the checkout drafts, and the order endpoint together.
//! Totals here use the checkout tax rate, which differs from the cart
//! summary's - see [`crate::store::cart::checkout_tax_rate`].

use thiserror::Error;

use bramblefig_core::PaymentMethod;

use crate::api::{ApiError, ShopApi};
use crate::models::{Order, OrderDraft, OrderItem, ShippingAddress};
use crate::store::{CartStore, CartTotals, CheckoutDraftStore, StoreError, cart};

/// Errors that can occur assembling or placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing in the cart to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The shipping form was never submitted.
    #[error("No shipping address on file")]
    MissingShipping,

    /// No payment method was chosen.
    #[error("No payment method chosen")]
    MissingPaymentMethod,

    /// Local store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Order placement failed at the backend.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The assembled order-review summary shown before placement.
#[derive(Debug, Clone)]
pub struct OrderReview {
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub totals: CartTotals,
}

/// Checkout flow over injected stores and API client.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    api: ShopApi,
    cart: CartStore,
    drafts: CheckoutDraftStore,
}

impl CheckoutService {
    /// Create a checkout service over the given collaborators.
    #[must_use]
    pub const fn new(api: ShopApi, cart: CartStore, drafts: CheckoutDraftStore) -> Self {
        Self { api, cart, drafts }
    }

    /// Assemble the order review from the cart and the staged drafts.
    ///
    /// Pure local reads - no network I/O. Fails fast when the cart is
    /// empty or a draft slot is missing, so a broken flow never reaches
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the cart is empty or a draft is absent.
    pub fn review(&self) -> Result<OrderReview, CheckoutError> {
        let lines = self.cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let shipping_address = self.drafts.shipping().ok_or(CheckoutError::MissingShipping)?;
        let payment_method = self
            .drafts
            .payment_method()
            .ok_or(CheckoutError::MissingPaymentMethod)?;

        let totals = CartTotals::compute(&lines, cart::checkout_tax_rate());

        let items = lines
            .into_iter()
            .map(|line| OrderItem {
                product: line.product,
                name: line.name,
                qty: line.qty,
                price: line.price,
                image: line.image,
            })
            .collect();

        Ok(OrderReview {
            items,
            shipping_address,
            payment_method,
            totals,
        })
    }

    /// Place the order assembled by [`Self::review`].
    ///
    /// On success the cart's persisted slot is removed and the checkout
    /// drafts are dropped; the created order is returned. On failure
    /// everything local is left untouched so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if assembly fails or the backend rejects
    /// the order.
    pub async fn place_order(&self) -> Result<Order, CheckoutError> {
        let review = self.review()?;

        let draft = OrderDraft {
            order_items: review.items,
            shipping_address: review.shipping_address,
            payment_method: review.payment_method,
            tax_price: review.totals.tax,
            shipping_price: review.totals.shipping,
            total_price: review.totals.total,
        };

        let order = self.api.place_order(&draft).await?;

        tracing::info!(order_id = %order.id, total = %order.total_price, "order placed");

        self.cart.clear();
        self.drafts.clear();

        Ok(order)
    }
}
