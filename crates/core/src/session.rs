//! Session and authentication state.
//!
//! A [`Session`] is the token + user pairing returned by the login and
//! registration endpoints. [`AuthState`] is the view of it the rest of the
//! client works with: either nobody is signed in, or a user is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SessionError;
use crate::id::RecordId;

/// Profile of the signed-in user, as returned by the auth endpoints.
///
/// Fields the client does not model are kept in `extra` so that a session
/// survives a save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: RecordId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(id: impl Into<RecordId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            company_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_company(mut self, company_id: impl Into<RecordId>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }
}

/// An authenticated actor: bearer token plus user profile.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Check the session is usable as an authenticated state.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        if self.user.email.trim().is_empty() {
            return Err(SessionError::MissingEmail);
        }
        Ok(())
    }

    /// Credential for the `Authorization: Bearer` header.
    pub fn bearer(&self) -> &str {
        &self.token
    }
}

// Tokens end up in logs via `{:?}` far too easily.
impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Notice that the backend rejected a bearer credential (HTTP 401).
///
/// `token` is the credential that was rejected, when the request carried one.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionRejected {
    pub token: Option<String>,
    pub path: String,
}

impl SessionRejected {
    /// Whether this rejection concerns `session`.
    ///
    /// A rejection without a token (login, registration) concerns no session.
    pub fn applies_to(&self, session: &Session) -> bool {
        self.token.as_deref() == Some(session.token.as_str())
    }
}

impl core::fmt::Debug for SessionRejected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionRejected")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("path", &self.path)
            .finish()
    }
}

/// Authentication state for the lifetime of the running client.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated { user: UserProfile },
}

impl AuthState {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(s) => AuthState::Authenticated {
                user: s.user.clone(),
            },
            None => AuthState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated { user } => Some(user),
            AuthState::Anonymous => None,
        }
    }
}
