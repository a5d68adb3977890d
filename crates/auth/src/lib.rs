//! `pragati-auth`: client-side session lifecycle.
//!
//! This crate is intentionally decoupled from HTTP: it persists sessions,
//! owns the authentication state and decides route access. Wiring it to the
//! API client happens in the shell.

pub mod context;
pub mod guard;
pub mod storage;
pub mod store;

pub use context::{AuthContext, AuthError};
pub use guard::{Access, GuardDecision, Guarded, RouteGuard};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, default_session_dir};
pub use store::SessionStore;
