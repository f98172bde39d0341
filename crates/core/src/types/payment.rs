//! Payment method selection.

use serde::{Deserialize, Serialize};

/// The closed set of payment methods the backend accepts.
///
/// Wire values are the exact strings the order endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Pay through PayPal.
    #[default]
    PayPal,
    /// Pay by credit card.
    CreditCard,
}

/// Error parsing a [`PaymentMethod`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid payment method: {0}. Valid methods: PayPal, CreditCard")]
pub struct PaymentMethodError(pub String);

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayPal => write!(f, "PayPal"),
            Self::CreditCard => write!(f, "CreditCard"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PayPal" | "paypal" => Ok(Self::PayPal),
            "CreditCard" | "creditcard" | "credit-card" => Ok(Self::CreditCard),
            _ => Err(PaymentMethodError(s.to_owned())),
        }
    }
}
