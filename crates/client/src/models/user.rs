//! User and session types.

use serde::{Deserialize, Serialize};

use bramblefig_core::UserId;

/// An authenticated session as returned by the login, register, and
/// profile-update endpoints.
///
/// The whole payload - token included - round-trips through the persisted
/// mirror so a later process starts logged in. `Debug` redacts the token.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Opaque bearer token. Trusted until the backend rejects it.
    pub token: String,
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// A user row from the admin listing endpoint. Never carries a token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}
