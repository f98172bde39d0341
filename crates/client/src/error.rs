//! Unified error handling for the storefront client.
//!
//! Each concern defines its own error enum (`StoreError`, `ApiError`,
//! `CheckoutError`); this module provides the umbrella type callers that
//! span concerns can return. Nothing here is fatal - every failure is
//! recoverable by the surrounding UI (retry, re-login, reload).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::checkout::CheckoutError;
use crate::store::StoreError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Backend API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Checkout flow failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Whether the error means the stored credentials were rejected.
    ///
    /// The client never detects expiry on its own; it only learns about a
    /// dead token when the backend rejects a request. Callers use this to
    /// decide to drop the session and prompt for login again.
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}
