//! Session validation errors.

use thiserror::Error;

/// A session failed its well-formedness check.
///
/// Raised before a session is allowed to become the authenticated state, so
/// the store never holds a session with a falsy token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The bearer token is empty or whitespace.
    #[error("session token is missing")]
    MissingToken,

    /// The user profile carries no email address.
    #[error("session user has no email")]
    MissingEmail,
}
