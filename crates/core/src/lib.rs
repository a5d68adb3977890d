//! `pragati-core`: session domain types shared by every client crate.
//!
//! This crate contains **pure data** (no IO, no HTTP, no storage).

pub mod error;
pub mod id;
pub mod session;

pub use error::SessionError;
pub use id::RecordId;
pub use session::{AuthState, Session, SessionRejected, UserProfile};
