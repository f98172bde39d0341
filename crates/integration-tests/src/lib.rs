//! Integration tests for Bramblefig.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bramblefig-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - mirror round-trips across simulated restarts
//! - `api_auth` - bearer-token attachment and rejection handling
//! - `checkout_flow` - cart -> drafts -> placement end to end
//!
//! Tests run against a `wiremock` server standing in for the shop backend
//! and a `tempfile` state directory standing in for the user's data dir -
//! no real network, no shared state between tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use bramblefig_client::config::ClientConfig;
use bramblefig_client::state::Storefront;
use tempfile::TempDir;
use wiremock::MockServer;

/// A storefront wired to a mock backend and a throwaway state directory.
pub struct TestContext {
    pub server: MockServer,
    pub storefront: Storefront,
    state_dir: TempDir,
}

impl TestContext {
    /// Start a mock backend and build a storefront pointed at it.
    ///
    /// # Panics
    ///
    /// Panics on setup failure; these helpers only run under tests.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let state_dir = TempDir::new().unwrap();

        let config =
            ClientConfig::new(&format!("{}/api", server.uri()), state_dir.path()).unwrap();
        let storefront = Storefront::new(config).unwrap();

        Self {
            server,
            storefront,
            state_dir,
        }
    }

    /// A second storefront over the same state directory - simulates a
    /// process restart (or a second browser tab).
    ///
    /// # Panics
    ///
    /// Panics on setup failure; these helpers only run under tests.
    #[allow(clippy::unwrap_used)]
    pub fn reopen(&self) -> Storefront {
        let config =
            ClientConfig::new(&format!("{}/api", self.server.uri()), self.state_dir.path())
                .unwrap();
        Storefront::new(config).unwrap()
    }
}
