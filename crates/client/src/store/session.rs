//! The session store: the authenticated user, hydrated at startup.

use std::sync::{Arc, Mutex, PoisonError};

use crate::models::UserSession;
use crate::store::{Mirror, StoreError, keys};

/// Holds the current session in memory and in the mirror.
///
/// Hydrates from the mirror at construction; absent or malformed state
/// starts the process anonymous. The token is opaque and trusted until the
/// backend rejects it - there is no refresh, expiry, or revocation logic
/// here. Callers react to `ApiError::Unauthorized` by logging out.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    mirror: Mirror,
    session: Mutex<Option<UserSession>>,
}

impl SessionStore {
    /// Create a session store, hydrating from the mirror.
    #[must_use]
    pub fn new(mirror: Mirror) -> Self {
        let session = mirror.load::<UserSession>(keys::USER);
        if let Some(user) = &session {
            tracing::debug!(user = %user.email, "hydrated session from mirror");
        }
        Self {
            inner: Arc::new(SessionStoreInner {
                mirror,
                session: Mutex::new(session),
            }),
        }
    }

    /// Replace the session with `session` and persist it.
    ///
    /// Every subsequent request carries the new token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn login(&self, session: UserSession) -> Result<(), StoreError> {
        self.inner.mirror.save(keys::USER, &session)?;
        *self.lock() = Some(session);
        Ok(())
    }

    /// Clear the in-memory session and remove the persisted slot.
    pub fn logout(&self) {
        *self.lock() = None;
        self.inner.mirror.remove(keys::USER);
    }

    /// The current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<UserSession> {
        self.lock().clone()
    }

    /// The current bearer token, if a session is present.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    /// Whether a session is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<UserSession>> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bramblefig_core::UserId;

    fn mirror() -> (tempfile::TempDir, Mirror) {
        let dir = tempfile::tempdir().unwrap();
        let mirror = Mirror::open(dir.path()).unwrap();
        (dir, mirror)
    }

    fn session(token: &str) -> UserSession {
        UserSession {
            id: UserId::new("u-1"),
            name: "Fern".to_owned(),
            email: "fern@example.com".to_owned(),
            is_admin: false,
            token: token.to_owned(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let (_dir, mirror) = mirror();
        let store = SessionStore::new(mirror);
        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_login_then_logout() {
        let (_dir, mirror) = mirror();
        let store = SessionStore::new(mirror.clone());

        store.login(session("tok-1")).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert!(mirror.load::<UserSession>(keys::USER).is_some());

        store.logout();
        assert_eq!(store.token(), None);
        assert!(mirror.load::<UserSession>(keys::USER).is_none());
    }

    #[test]
    fn test_hydrates_across_reload() {
        let (_dir, mirror) = mirror();
        {
            let store = SessionStore::new(mirror.clone());
            store.login(session("tok-keep")).unwrap();
        }

        let reloaded = SessionStore::new(mirror);
        assert!(reloaded.is_logged_in());
        assert_eq!(reloaded.token().as_deref(), Some("tok-keep"));
    }

    #[test]
    fn test_malformed_session_starts_anonymous() {
        let (dir, mirror) = mirror();
        std::fs::write(dir.path().join("user.json"), "{\"token\": 42}").unwrap();

        let store = SessionStore::new(mirror);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let (_dir, mirror) = mirror();
        let store = SessionStore::new(mirror);

        store.login(session("tok-old")).unwrap();
        store.login(session("tok-new")).unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-new"));
    }
}
