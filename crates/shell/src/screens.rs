//! Login and sign-up flows.
//!
//! Screens own no state of their own: they validate input, call the API and
//! hand a successful session to the auth context. Everything a user should
//! see comes back as a [`ScreenOutcome`].

use pragati_api::{ApiClient, ApiError, LoginRequest, RegisterRequest};
use pragati_auth::{AuthContext, AuthError};
use pragati_core::Session;

use crate::routes::Route;

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const MISSING_CREDENTIALS: &str = "Please enter your email and password.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match. Please check again.";
pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    Navigate(Route),
    /// Inline error shown on the screen; no navigation happens.
    Error(String),
}

/// Inline text for a failed auth call: the server's own message when it sent
/// one, `fallback` otherwise.
fn inline_error(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Status { message, .. } => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Adopt a server-issued session.
fn sign_in(auth: &AuthContext, session: Session, fallback: &str) -> ScreenOutcome {
    match auth.login(session) {
        Ok(()) => ScreenOutcome::Navigate(Route::Dashboard),
        Err(AuthError::InvalidSession(err)) => {
            tracing::warn!(error = %err, "server returned an unusable session");
            ScreenOutcome::Error(INVALID_CREDENTIALS.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to persist session");
            ScreenOutcome::Error(fallback.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginScreen {
    auth: AuthContext,
    api: ApiClient,
}

impl LoginScreen {
    pub fn new(auth: AuthContext, api: ApiClient) -> Self {
        Self { auth, api }
    }

    pub async fn submit(&self, email: &str, password: &str) -> ScreenOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return ScreenOutcome::Error(MISSING_CREDENTIALS.to_string());
        }

        let session = match self.api.login(&LoginRequest::new(email, password)).await {
            Ok(session) => session,
            Err(err) => return ScreenOutcome::Error(inline_error(&err, LOGIN_FAILED)),
        };

        sign_in(&self.auth, session, LOGIN_FAILED)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub company_name: String,
    pub company_email: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl core::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignupForm")
            .field("company_name", &self.company_name)
            .field("company_email", &self.company_email)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl SignupForm {
    fn check(&self) -> Result<RegisterRequest, &'static str> {
        let req = RegisterRequest {
            company_name: self.company_name.trim().to_string(),
            company_email: self.company_email.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        if req.company_name.is_empty() || req.company_email.is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(MISSING_FIELDS);
        }
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH);
        }
        Ok(req)
    }
}

#[derive(Debug, Clone)]
pub struct SignupScreen {
    auth: AuthContext,
    api: ApiClient,
}

impl SignupScreen {
    pub fn new(auth: AuthContext, api: ApiClient) -> Self {
        Self { auth, api }
    }

    /// Register the company and sign its first user in.
    pub async fn submit(&self, form: &SignupForm) -> ScreenOutcome {
        let req = match form.check() {
            Ok(req) => req,
            Err(msg) => return ScreenOutcome::Error(msg.to_string()),
        };

        let session = match self.api.register(&req).await {
            Ok(session) => session,
            Err(err) => return ScreenOutcome::Error(inline_error(&err, REGISTRATION_FAILED)),
        };

        sign_in(&self.auth, session, REGISTRATION_FAILED)
    }
}
