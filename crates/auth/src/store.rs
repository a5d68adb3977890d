//! Durable session persistence.
//!
//! A session is stored as two independent entries: `token` holds the raw
//! bearer token and `user` holds the JSON-serialized user profile. Loading is
//! forgiving: anything missing or unreadable counts as "no session".

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use pragati_core::{Session, UserProfile};

use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Older clients persisted the whole login response under `user`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredUser {
    Profile(UserProfile),
    Envelope { user: UserProfile },
}

impl StoredUser {
    fn into_profile(self) -> UserProfile {
        match self {
            StoredUser::Profile(p) | StoredUser::Envelope { user: p } => p,
        }
    }
}

/// Session persistence over a [`Storage`] backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// File-backed store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(FileStorage::open(dir)?))
    }

    /// Persist `session`, replacing whatever was stored before.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user).map_err(|source| StorageError::Encode {
            key: USER_KEY.to_string(),
            source,
        })?;

        // The token entry is what marks a session as present, so it goes last.
        let previous_user = self.read(USER_KEY);
        self.storage.set(USER_KEY, &user)?;

        if let Err(err) = self.storage.set(TOKEN_KEY, &session.token) {
            // Put the previous user back so it still pairs with the stored token.
            let restored = match previous_user {
                Some(prev) => self.storage.set(USER_KEY, &prev),
                None => self.storage.remove(USER_KEY),
            };
            if let Err(restore_err) = restored {
                tracing::error!(error = %restore_err, "failed to restore previous user entry; clearing session");
                let _ = self.clear();
            }
            return Err(err);
        }
        Ok(())
    }

    /// Load the persisted session, or `None` if absent or unreadable.
    pub fn load(&self) -> Option<Session> {
        let token = self.read(TOKEN_KEY)?;
        let raw_user = self.read(USER_KEY)?;

        let user = match serde_json::from_str::<StoredUser>(&raw_user) {
            Ok(stored) => stored.into_profile(),
            Err(err) => {
                tracing::warn!(error = %err, "stored user profile is malformed; ignoring session");
                return None;
            }
        };

        let session = Session::new(token, user);
        if let Err(err) = session.validate() {
            tracing::warn!(error = %err, "stored session is incomplete; ignoring it");
            return None;
        }
        Some(session)
    }

    /// Remove both entries. Clearing an empty store is a no-op.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    /// Raw token entry, whether or not a full session loads.
    pub fn stored_token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read session entry");
                None
            }
        }
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
