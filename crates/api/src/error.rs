//! Client-side API error model.

use thiserror::Error;

/// Fallback shown when a failed response carries no `message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "API Error";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, timeout, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. Displays as the server's
    /// message alone; the status is available from [`ApiError::status`].
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// The caller lost interest before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The credential was rejected; the session is stale.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message suitable for an inline error on the triggering screen.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_surface_the_server_message() {
        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Unauthorized");
        assert_eq!(err.to_string(), "Unauthorized");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn non_status_errors_are_not_unauthorized() {
        assert!(!ApiError::Cancelled.is_unauthorized());
        assert_eq!(ApiError::Cancelled.status(), None);
        assert_eq!(ApiError::Cancelled.message(), "request cancelled");
    }
}
