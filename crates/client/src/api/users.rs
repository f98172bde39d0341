//! User and authentication endpoints.
//!
//! These calls return payloads; they do not touch the session store.
//! Callers (the aggregate state, the CLI) decide when a returned
//! [`UserSession`] becomes the current session.

use serde::Serialize;
use tracing::instrument;

use bramblefig_core::UserId;

use crate::models::{UserSession, UserSummary};

use super::{ApiError, ShopApi};

/// Credentials for `POST users/login/`.
///
/// The backend authenticates on the email but calls the field `username`.
#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Payload for `POST users/register/`.
#[derive(Debug, Clone, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Payload for `PUT users/profile/update/`.
///
/// An empty `password` means "keep the current one".
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ShopApi {
    /// Authenticate and receive a session payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` on bad credentials, or another
    /// `ApiError` if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserSession, ApiError> {
        self.post_json(
            "users/login/",
            &LoginRequest {
                username: email,
                password,
            },
        )
        .await
    }

    /// Create an account and receive a session payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (e.g., the email is taken).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserSession, ApiError> {
        self.post_json(
            "users/register/",
            &RegisterRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    /// Get the current user's profile. Requires a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserSummary, ApiError> {
        self.get_json("users/profile/").await
    }

    /// Update the current user's profile.
    ///
    /// Returns a fresh session payload (token included) that replaces the
    /// stored one. Requires a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserSession, ApiError> {
        self.put_json("users/profile/update/", update).await
    }

    /// List all users. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("users/").await
    }

    /// Delete a user. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.delete_unit(&format!("users/delete/{user_id}/")).await
    }
}
