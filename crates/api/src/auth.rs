//! Authentication endpoints.

use serde::{Deserialize, Serialize};

use pragati_core::Session;

use crate::client::{ApiClient, HttpMethod};
use crate::error::ApiError;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Company sign-up: creates the company account and its first user.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub company_name: String,
    pub company_email: String,
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("company_name", &self.company_name)
            .field("company_email", &self.company_email)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Auth endpoints answer either `{token, user, ...}` or `{data: {token, user}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SessionEnvelope {
    Flat(Session),
    Wrapped { data: Session },
}

impl From<SessionEnvelope> for Session {
    fn from(value: SessionEnvelope) -> Self {
        match value {
            SessionEnvelope::Flat(s) | SessionEnvelope::Wrapped { data: s } => s,
        }
    }
}

impl ApiClient {
    /// `POST /api/auth/login`. The returned session is not yet validated or
    /// stored; hand it to the auth context for that.
    pub async fn login(&self, req: &LoginRequest) -> Result<Session, ApiError> {
        let envelope: SessionEnvelope = self
            .fetch(HttpMethod::Post, LOGIN_PATH, Some(req), None, LOGIN_FAILED)
            .await?;
        tracing::info!(email = %req.email, "login accepted by server");
        Ok(envelope.into())
    }

    /// `POST /api/auth/register`.
    pub async fn register(&self, req: &RegisterRequest) -> Result<Session, ApiError> {
        let envelope: SessionEnvelope = self
            .fetch(HttpMethod::Post, REGISTER_PATH, Some(req), None, REGISTER_FAILED)
            .await?;
        tracing::info!(company = %req.company_name, "company registered");
        Ok(envelope.into())
    }
}
