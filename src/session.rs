use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::models::UserData;

/// What the site keeps for a signed-in admin: the bearer token and the user
/// record that came with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: UserData,
}

/// Session state with an explicit lifecycle instead of ad hoc storage reads
/// scattered through call sites. The token is read before each authorized
/// request; no expiry check happens on this side.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<SessionData>;

    fn store(&self, session: SessionData);

    /// Drops the session. Also called by the HTTP client when the backend
    /// answers 401, so a stale token is not replayed forever.
    fn clear(&self);

    fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }
}

/// In-memory store, shared across the process the way a browser tab shares
/// local storage.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<SessionData>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionData> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, session: SessionData) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
