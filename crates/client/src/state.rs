//! Aggregate client state: the dependency-injection root.
//!
//! Everything the cart/favorites/session machinery needs is constructed
//! here once at process start and handed down explicitly - there are no
//! module-level singletons.

use std::sync::Arc;

use crate::api::ShopApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::UserSession;
use crate::services::CheckoutService;
use crate::store::{
    CartStore, CheckoutDraftStore, FavoritesStore, Mirror, SessionStore, StoreError,
};

/// The assembled storefront client.
///
/// Cheaply cloneable via `Arc`; clones share every store and the HTTP
/// connection pool.
#[derive(Debug, Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

#[derive(Debug)]
struct StorefrontInner {
    config: ClientConfig,
    cart: CartStore,
    favorites: FavoritesStore,
    session: SessionStore,
    drafts: CheckoutDraftStore,
    api: ShopApi,
    checkout: CheckoutService,
}

impl Storefront {
    /// Build the full client from configuration.
    ///
    /// Opens the state mirror, hydrates every store from it, and wires the
    /// API client to the session store for bearer attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created or the
    /// HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mirror = Mirror::open(config.state_dir.clone())?;

        let session = SessionStore::new(mirror.clone());
        let cart = CartStore::new(mirror.clone());
        let favorites = FavoritesStore::new(mirror.clone());
        let drafts = CheckoutDraftStore::new(mirror);

        let api = ShopApi::new(&config, session.clone())?;
        let checkout = CheckoutService::new(api.clone(), cart.clone(), drafts.clone());

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                cart,
                favorites,
                session,
                drafts,
                api,
                checkout,
            }),
        })
    }

    /// Build the client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or construction fails.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env().map_err(ClientError::Config)?;
        Self::new(config)
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &ShopApi {
        &self.inner.api
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the favorites store.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the checkout draft store.
    #[must_use]
    pub fn drafts(&self) -> &CheckoutDraftStore {
        &self.inner.drafts
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    /// Store `session` as the current session.
    ///
    /// Every subsequent API call carries its token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn login(&self, session: UserSession) -> Result<(), StoreError> {
        tracing::info!(user = %session.email, "logged in");
        self.inner.session.login(session)
    }

    /// Drop the current session. Cart and favorites survive logout.
    pub fn logout(&self) {
        self.inner.session.logout();
        tracing::info!("logged out");
    }

    /// Full teardown: session, cart, and checkout drafts.
    pub fn reset(&self) {
        self.inner.session.logout();
        self.inner.cart.clear();
        self.inner.drafts.clear();
        tracing::info!("local state reset");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bramblefig_core::UserId;

    fn storefront(dir: &std::path::Path) -> Storefront {
        let config = ClientConfig::new("http://127.0.0.1:1/api", dir).unwrap();
        Storefront::new(config).unwrap()
    }

    fn session() -> UserSession {
        UserSession {
            id: UserId::new("u-1"),
            name: "Fern".to_owned(),
            email: "fern@example.com".to_owned(),
            is_admin: false,
            token: "tok-1".to_owned(),
        }
    }

    #[test]
    fn test_login_logout_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = storefront(dir.path());

        storefront.login(session()).unwrap();
        assert!(storefront.session().is_logged_in());

        storefront.logout();
        assert!(!storefront.session().is_logged_in());
    }

    #[test]
    fn test_logout_keeps_cart() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = storefront(dir.path());

        let product = serde_json::from_value(serde_json::json!({
            "_id": "p1", "name": "Mug", "image": "/i.jpg", "price": 8
        }))
        .unwrap();
        storefront.cart().add_item(&product, 1).unwrap();
        storefront.login(session()).unwrap();

        storefront.logout();
        assert!(!storefront.cart().is_empty());
    }

    #[test]
    fn test_reset_tears_everything_down() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = storefront(dir.path());

        let product = serde_json::from_value(serde_json::json!({
            "_id": "p1", "name": "Mug", "image": "/i.jpg", "price": 8
        }))
        .unwrap();
        storefront.cart().add_item(&product, 1).unwrap();
        storefront.login(session()).unwrap();

        storefront.reset();

        assert!(!storefront.session().is_logged_in());
        assert!(storefront.cart().is_empty());
        assert!(storefront.drafts().shipping().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = storefront(dir.path());
        let clone = storefront.clone();

        storefront.login(session()).unwrap();
        assert!(clone.session().is_logged_in());
    }
}
