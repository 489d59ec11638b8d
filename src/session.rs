//! Session state shared by the whole client

use std::sync::RwLock;

use log::warn;

use crate::storage::TokenStorage;
use crate::types::User;

/// An authenticated session: the opaque bearer token plus the profile the
/// server returned alongside it
#[derive(Debug, Clone)]
pub struct Session {
    /// The auth token, sent as `Authorization: Bearer <token>`
    pub token: String,

    /// Profile from the login/register response; `None` when the session was
    /// restored from storage
    pub user: Option<User>,
}

/// Process-wide session store. Construct it once at startup via
/// [`SessionStore::init`] and share it via `Arc`; every consumer (auth flow,
/// HTTP layer, route guard) reads the same state.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    /// Create the store, restoring any previously persisted token. This is
    /// the single initialization point; it runs before anything consults the
    /// authentication state.
    pub fn init(storage: Box<dyn TokenStorage>) -> Self {
        let restored = match storage.load() {
            Ok(token) => token.map(|token| Session { token, user: None }),
            Err(err) => {
                warn!("failed to read persisted token: {}", err);
                None
            }
        };

        Self {
            current: RwLock::new(restored),
            storage,
        }
    }

    /// The current token, if a session is active
    pub fn token(&self) -> Option<String> {
        let guard = self.current.read().unwrap();
        guard.as_ref().map(|session| session.token.clone())
    }

    /// The current user profile, if one is known
    pub fn user(&self) -> Option<User> {
        let guard = self.current.read().unwrap();
        guard.as_ref().and_then(|session| session.user.clone())
    }

    /// Derived purely from token presence; never stored independently, so it
    /// cannot diverge from the token state.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Install a new session and persist the token
    pub fn set_session(&self, token: &str, user: Option<User>) {
        if let Err(err) = self.storage.store(token) {
            warn!("failed to persist token: {}", err);
        }

        let mut guard = self.current.write().unwrap();
        *guard = Some(Session {
            token: token.to_string(),
            user,
        });
    }

    /// Drop the session and remove the persisted token
    pub fn clear_session(&self) {
        if let Err(err) = self.storage.clear() {
            warn!("failed to remove persisted token: {}", err);
        }

        let mut guard = self.current.write().unwrap();
        *guard = None;
    }
}
