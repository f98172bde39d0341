//! Higher-level flows composed from the stores and the API client.

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutService, OrderReview};
