//! `pragati-api`: HTTP client for the Pragati backend.
//!
//! One request path for every call (JSON in, JSON out, bearer auth), a
//! normalized response envelope, and a channel that reports rejected
//! credentials to whoever owns the session.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod response;

pub use auth::{LOGIN_PATH, LoginRequest, REGISTER_PATH, RegisterRequest};
pub use client::{ApiClient, HttpMethod};
pub use config::ApiConfig;
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE};
pub use response::ApiResponse;
pub use tokio_util::sync::CancellationToken;
