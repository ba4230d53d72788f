//! Session state for authenticated API calls.
//!
//! This module provides the [`SessionStore`], the typed facade over a
//! [`KeyValueStore`] that holds the credential token, the cached
//! [`Identity`] and the "has previously logged in" flag.
//!
//! Only the request pipeline, the silent recovery agent and the explicit
//! login action write the token. Everything else reads.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::identity::Identity;
use crate::auth::storage::{KeyValueStore, MemoryStore, StorageError};

/// Storage key of the credential token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the cached identity record.
pub const IDENTITY_KEY: &str = "userInfo";

/// Storage key of the "has previously logged in" flag.
pub const LOGGED_IN_BEFORE_KEY: &str = "hasStoredUserInfo";

/// Typed access to the persisted session fields.
///
/// `SessionStore` is cheap to clone; clones share the same backing store.
///
/// # Example
///
/// ```rust
/// use mini_shop_api::{Identity, SessionStore, UserId};
///
/// let session = SessionStore::in_memory();
/// assert!(!session.is_logged_in());
///
/// session
///     .establish("token-1", &Identity::new(UserId::Number(9), None, None))
///     .unwrap();
/// assert_eq!(session.token().as_deref(), Some("token-1"));
/// assert!(session.has_logged_in());
///
/// session.clear().unwrap();
/// assert!(session.token().is_none());
/// assert!(session.identity().is_none());
/// assert!(!session.has_logged_in());
/// ```
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a session store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Creates a session store backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Returns the stored credential token, if any. Empty tokens read as `None`.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY)? {
            Value::String(token) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    /// Replaces the credential token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the value.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.backend.set(TOKEN_KEY, Value::String(token.to_string()))
    }

    /// Returns `true` if a credential token is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Returns the cached identity, if one is stored and readable.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.backend
            .get(IDENTITY_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Replaces the cached identity without touching the token.
    ///
    /// Used after a profile update so the cached nickname and avatar follow
    /// the server.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the value.
    pub fn set_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        self.backend.set(IDENTITY_KEY, serde_json::to_value(identity)?)
    }

    /// Returns `true` if a session was established at some point and has not
    /// been invalidated since.
    #[must_use]
    pub fn has_logged_in(&self) -> bool {
        matches!(self.backend.get(LOGGED_IN_BEFORE_KEY), Some(Value::Bool(true)))
    }

    /// Stores a fresh token, identity and login-history flag in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the batch.
    pub fn establish(&self, token: &str, identity: &Identity) -> Result<(), StorageError> {
        let identity = serde_json::to_value(identity)?;
        self.backend.set_many(vec![
            (IDENTITY_KEY, identity),
            (LOGGED_IN_BEFORE_KEY, Value::Bool(true)),
            (TOKEN_KEY, Value::String(token.to_string())),
        ])
    }

    /// Removes the token, identity and login-history flag in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend
            .remove_many(&[TOKEN_KEY, IDENTITY_KEY, LOGGED_IN_BEFORE_KEY])
    }

    /// Returns a point-in-time copy of the session fields.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token(),
            identity: self.identity(),
            has_logged_in: self.has_logged_in(),
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .finish()
    }
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
};

/// A point-in-time copy of the session fields.
///
/// The `Debug` output masks the token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The credential token.
    pub token: Option<String>,
    /// The cached identity.
    pub identity: Option<Identity>,
    /// The login-history flag.
    pub has_logged_in: bool,
}

impl fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("token", &self.token.as_ref().map(|_| "*****"))
            .field("identity", &self.identity)
            .field("has_logged_in", &self.has_logged_in)
            .finish()
    }
}
